//! tutor-forge: lesson authoring backend with Hexagonal Architecture.
//!
//! Knowledge text becomes a course outline, the outline becomes narrated slides.
//! Both steps go through a text model, or a deterministic mock when none is configured.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
