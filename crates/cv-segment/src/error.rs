// error.rs — Error types for the segment subsystem.

use cv_store::StoreError;
use thiserror::Error;

/// Errors that can occur during segment and touch-goal operations.
///
/// All of these are local and recoverable: the caller re-prompts, nothing
/// is fatal to the process, and a failed operation never mutates state.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// A required field was blank or otherwise invalid.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Delete or structural edit attempted on a reserved segment.
    #[error("segment {0} is reserved and cannot be modified this way")]
    Immutable(i64),

    /// The requested segment was not found.
    #[error("segment not found: {0}")]
    NotFound(i64),

    /// The persistence layer failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
