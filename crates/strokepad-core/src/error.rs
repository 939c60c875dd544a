//! Errors for edits applied to strokes and the scene.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Edit errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("No shape is highlighted")]
    NoSelection,
    #[error("Shape {0} is not part of the scene")]
    UnknownShape(ShapeId),
    #[error("Scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;
