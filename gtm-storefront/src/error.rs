//! Hook handler error types

use thiserror::Error;

/// Failure reported by a host catalog or checkout provider.
///
/// Providers sit in front of the shop backend; whatever the concrete
/// failure was (database, RPC, host API), it reaches the hooks as an
/// opaque message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors a hook handler can hit while assembling payload data.
///
/// None of these ever reach the host: the dispatch layer logs them and
/// degrades to "no analytics recorded" for the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("provider lookup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("{entity} not found for key {key}")]
    RecordNotFound { entity: &'static str, key: String },
}

pub type HookResult<T> = Result<T, HookError>;
