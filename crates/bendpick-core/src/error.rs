//! Error types for the pick engine.
//!
//! Geometric edge cases (parallel lines, tangent circles, degenerate arcs) are
//! never errors: they surface as `Option`/empty results or as a
//! [`PickRejection`](crate::pick::PickRejection). Only structurally invalid
//! input at the pipeline boundary becomes an [`EngineError`].

use thiserror::Error;

use crate::types::EntityId;

/// Errors that abort a pipeline run for one drawing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A segment carries a NaN or infinite coordinate.
    #[error("Entity {id} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// The offending entity.
        id: EntityId,
        /// X of the first non-finite point.
        x: f64,
        /// Y of the first non-finite point.
        y: f64,
    },

    /// A segment reached the engine without a layer name.
    #[error("Entity {id} has no layer classification")]
    MissingLayer {
        /// The offending entity.
        id: EntityId,
    },

    /// A configuration value is unusable.
    #[error("Invalid configuration '{name}': {reason}")]
    InvalidConfig {
        /// Name of the field.
        name: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidConfig`].
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
