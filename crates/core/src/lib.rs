//! `minitrack-core`: shared building blocks for the stage-pipeline domain.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult, ErrorCode};
pub use id::TypeId;
