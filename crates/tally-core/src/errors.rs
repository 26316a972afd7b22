//! Cross-cutting error types for Tally.
//!
//! Domain-specific errors (`DatabaseError`, `ConfigError`) are defined in
//! their respective crates.

use thiserror::Error;

/// Errors that can be raised by any Tally crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A string could not be parsed into one of the core enums.
    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
