//! Infrastructure adapters. Implement ports.
//!
//! Text models, speech-to-text, the HTTP server, console output. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod speech;
pub mod ui;
