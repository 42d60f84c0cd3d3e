//! Accessibility modes and the guidance table that conditions generation prompts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Learner profile. Only affects prompt phrasing.
///
/// Parsing never fails: unknown labels become [`AccessibilityMode::General`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessibilityMode {
    Adhd,
    Dyslexia,
    #[default]
    General,
    Hearing,
}

/// Prompt guidance for one mode, one string per generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessibilityGuidance {
    pub outline: &'static str,
    pub slides: &'static str,
}

const ADHD: AccessibilityGuidance = AccessibilityGuidance {
    outline: "Use short, focused segments. Include frequent interaction points. Break complex topics into digestible chunks.",
    slides: "Keep slides concise (3-4 bullets max). Use active language. Include engagement prompts.",
};

const DYSLEXIA: AccessibilityGuidance = AccessibilityGuidance {
    outline: "Use clear, simple language. Avoid long paragraphs. Focus on visual aids and audio support.",
    slides: "Use simple, clear language. Short sentences. Bullet points over paragraphs.",
};

/// Default entry, used for General and for any unrecognized mode.
const GENERAL: AccessibilityGuidance = AccessibilityGuidance {
    outline: "Balanced approach with text and visuals. Standard educational pacing.",
    slides: "Standard educational format with 4-5 bullets per slide.",
};

const HEARING: AccessibilityGuidance = AccessibilityGuidance {
    outline: "Emphasize visual content. Include comprehensive text descriptions. Add captions and diagrams.",
    slides: "Comprehensive text. Detailed descriptions. Visual-heavy content.",
};

impl AccessibilityMode {
    pub const ALL: [AccessibilityMode; 4] = [
        AccessibilityMode::Adhd,
        AccessibilityMode::Dyslexia,
        AccessibilityMode::General,
        AccessibilityMode::Hearing,
    ];

    /// Lenient parse (case-insensitive, surrounding whitespace ignored).
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "adhd" => Self::Adhd,
            "dyslexia" => Self::Dyslexia,
            "hearing" => Self::Hearing,
            _ => Self::General,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Adhd => "ADHD",
            Self::Dyslexia => "Dyslexia",
            Self::General => "General",
            Self::Hearing => "Hearing",
        }
    }

    pub fn guidance(self) -> &'static AccessibilityGuidance {
        match self {
            Self::Adhd => &ADHD,
            Self::Dyslexia => &DYSLEXIA,
            Self::General => &GENERAL,
            Self::Hearing => &HEARING,
        }
    }
}

impl From<String> for AccessibilityMode {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<&str> for AccessibilityMode {
    fn from(label: &str) -> Self {
        Self::parse(label)
    }
}

impl From<AccessibilityMode> for String {
    fn from(mode: AccessibilityMode) -> Self {
        mode.label().to_string()
    }
}

impl fmt::Display for AccessibilityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
