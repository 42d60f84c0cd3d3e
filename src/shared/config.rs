//! Application configuration. Server binding, model and speech credentials, limits.
//!
//! All environment access happens in [`AppConfig::load`]; the accessors below only
//! look at fields, so tests can build a config by hand.

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 120;
/// Upload cap for audio transcription (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENAI_TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Which text-model API the live generator talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Anthropic,
    OpenAi,
}

impl AiProvider {
    /// Unknown values fall back to Anthropic.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" | "open_ai" | "open-ai" => Self::OpenAi,
            _ => Self::Anthropic,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppConfig {
    /// Bind address. Read from TUTOR_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Listen port. Read from TUTOR_PORT or PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Deployment label reported by the health probe. Read from TUTOR_ENVIRONMENT or APP_ENV.
    #[serde(default)]
    pub environment: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Text model
    // ─────────────────────────────────────────────────────────────────────────
    /// "anthropic" (default) or "openai". Read from TUTOR_AI_PROVIDER.
    #[serde(default)]
    pub ai_provider: Option<String>,

    /// Model API key. Read from TUTOR_AI_API_KEY, else the provider's conventional
    /// variable (ANTHROPIC_API_KEY / OPENAI_API_KEY). Absent means mock generation.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Endpoint override. Read from TUTOR_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Read from TUTOR_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Per-request timeout for model calls. Read from TUTOR_AI_TIMEOUT_SECS.
    #[serde(default)]
    pub ai_timeout_secs: Option<u64>,

    #[serde(default)]
    pub outline_max_tokens: Option<u32>,

    #[serde(default)]
    pub slides_max_tokens: Option<u32>,

    // ─────────────────────────────────────────────────────────────────────────
    // Transcription
    // ─────────────────────────────────────────────────────────────────────────
    /// Speech-to-text API key. Read from TUTOR_TRANSCRIPTION_API_KEY, else OPENAI_API_KEY.
    #[serde(default)]
    pub transcription_api_key: Option<String>,

    #[serde(default)]
    pub transcription_api_url: Option<String>,

    #[serde(default)]
    pub transcription_model: Option<String>,

    /// Max audio upload size in bytes. Read from TUTOR_MAX_UPLOAD_BYTES.
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TUTOR"));
        if let Ok(path) = std::env::var("TUTOR_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // PORT / APP_ENV are read directly so common hosting conventions work
        if cfg.port.is_none() {
            if let Ok(s) = std::env::var("PORT") {
                if let Ok(port) = s.parse::<u16>() {
                    cfg.port = Some(port);
                }
            }
        }
        if cfg.environment.is_none() {
            cfg.environment = std::env::var("APP_ENV").ok();
        }
        // Provider-native key names, only when no TUTOR_ key was given
        if cfg.ai_api_key.is_none() {
            let var = match cfg.provider() {
                AiProvider::Anthropic => "ANTHROPIC_API_KEY",
                AiProvider::OpenAi => "OPENAI_API_KEY",
            };
            cfg.ai_api_key = std::env::var(var).ok();
        }
        if cfg.transcription_api_key.is_none() {
            cfg.transcription_api_key = std::env::var("OPENAI_API_KEY").ok();
        }
        Ok(cfg)
    }

    pub fn host_or_default(&self) -> String {
        self.host.clone().unwrap_or_else(|| "0.0.0.0".to_string())
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn environment_or_default(&self) -> String {
        self.environment
            .clone()
            .unwrap_or_else(|| "development".to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text model helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn provider(&self) -> AiProvider {
        self.ai_provider
            .as_deref()
            .map(AiProvider::parse)
            .unwrap_or(AiProvider::Anthropic)
    }

    /// Model API key, ignoring blank values.
    pub fn ai_api_key(&self) -> Option<String> {
        non_blank(&self.ai_api_key)
    }

    /// Returns true if a live model is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }

    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url.clone().unwrap_or_else(|| {
            match self.provider() {
                AiProvider::Anthropic => ANTHROPIC_MESSAGES_URL,
                AiProvider::OpenAi => OPENAI_CHAT_URL,
            }
            .to_string()
        })
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model.clone().unwrap_or_else(|| {
            match self.provider() {
                AiProvider::Anthropic => "claude-3-5-sonnet-20241022",
                AiProvider::OpenAi => "gpt-4o-mini",
            }
            .to_string()
        })
    }

    pub fn ai_timeout_secs_or_default(&self) -> u64 {
        self.ai_timeout_secs.unwrap_or(DEFAULT_AI_TIMEOUT_SECS)
    }

    pub fn outline_max_tokens_or_default(&self) -> u32 {
        self.outline_max_tokens.unwrap_or(4000)
    }

    pub fn slides_max_tokens_or_default(&self) -> u32 {
        self.slides_max_tokens.unwrap_or(8000)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transcription helpers
    // ─────────────────────────────────────────────────────────────────────────

    pub fn transcription_api_key(&self) -> Option<String> {
        non_blank(&self.transcription_api_key)
    }

    pub fn transcription_api_url_or_default(&self) -> String {
        self.transcription_api_url
            .clone()
            .unwrap_or_else(|| OPENAI_TRANSCRIPTIONS_URL.to_string())
    }

    pub fn transcription_model_or_default(&self) -> String {
        self.transcription_model
            .clone()
            .unwrap_or_else(|| "whisper-1".to_string())
    }

    pub fn max_upload_bytes_or_default(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
