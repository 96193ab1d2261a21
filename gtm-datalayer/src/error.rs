//! Error types for the data layer core

use thiserror::Error;

/// Errors surfaced by the data layer core.
///
/// The public buffer surface stays infallible: a corrupt stored payload is
/// logged and recovered as empty, because the payload is advisory
/// analytics data and must never break the host request. The error type
/// exists for the hydration internals and for tests asserting on the
/// recovery path.
#[derive(Debug, Error)]
pub enum DataLayerError {
    /// The backing store held a value that does not decode as a payload.
    #[error("stored payload is corrupt: {0}")]
    CorruptPayload(#[from] serde_json::Error),
}

/// Result type for data layer operations.
pub type DataLayerResult<T> = Result<T, DataLayerError>;
