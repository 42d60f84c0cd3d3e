//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod accessibility;
pub mod entities;
pub mod errors;
pub mod fence;

pub use accessibility::{AccessibilityGuidance, AccessibilityMode};
pub use entities::{AudioClip, BulletPoint, OutlineItem, OutlineItemKind, OutlineResult, Slide};
pub use errors::DomainError;
pub use fence::{FencedPayload, extract_payload};
