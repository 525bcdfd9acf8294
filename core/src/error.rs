// cartshop/src/error.rs
use thiserror::Error;

/// Failure reported by a [`SessionStore`](crate::session::SessionStore) implementation.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session value under '{key}' could not be encoded. Source: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session value under '{key}' could not be decoded. Source: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session backend error: {0}")]
    Backend(String),
}

/// Failure reported by a [`ProductLookup`](crate::catalog::ProductLookup) implementation.
#[derive(Debug, Error)]
#[error("Product lookup failed: {message}")]
pub struct LookupError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl LookupError {
    pub fn with_source<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart session error: {0}")]
    Session(#[from] SessionError),

    #[error("Cart product lookup error: {0}")]
    Lookup(#[from] LookupError),
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
