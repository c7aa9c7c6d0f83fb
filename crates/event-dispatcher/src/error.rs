//! Dispatch error types.

use thiserror::Error;

/// Errors that can occur while building or dispatching events.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A handler failed while processing a notification.
    ///
    /// Propagated unmodified out of `notify`; handlers registered after
    /// the failing one are not invoked for that notification.
    #[error("Handler {handler} failed: {source}")]
    Handler {
        handler: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An event payload could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DispatchError {
    /// Wraps a handler-specific failure with the handler's name.
    pub fn handler(
        handler: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Handler {
            handler,
            source: source.into(),
        }
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
