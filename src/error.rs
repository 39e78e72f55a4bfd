use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors that can occur while driving a paint session
#[derive(Debug, Error)]
pub enum PaintError {
    /// A drawing operation was called before a surface was bound
    #[error("Cannot {operation}: no drawing surface has been initialized")]
    SurfaceNotInitialized { operation: &'static str },

    /// Writing the drawing to storage failed
    #[error("Failed to persist drawing: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Result type for session operations
pub type PaintResult<T> = Result<T, PaintError>;
