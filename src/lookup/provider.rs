use std::fmt;

use async_trait::async_trait;

use crate::core::element::ElementRecord;

/// Errors that can occur during a lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// No credentials configured. The caller shows a "not configured" fallback.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned an error response.
    Api { status: u16, message: String },
    /// Failed to parse the response, or the response had no usable text.
    Parse(String),
    /// The response succeeded but carried no image part.
    NoImage,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Config(msg) => write!(f, "config error: {msg}"),
            LookupError::Network(msg) => write!(f, "network error: {msg}"),
            LookupError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            LookupError::Parse(msg) => write!(f, "parse error: {msg}"),
            LookupError::NoImage => write!(f, "response contained no image"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Opaque asynchronous source of per-element facts and images.
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// One or two sentences of trivia about the element.
    async fn fun_fact(&self, element: &ElementRecord) -> Result<String, LookupError>;

    /// A displayable image reference: a `data:` URI or a URL.
    async fn element_image(&self, element: &ElementRecord) -> Result<String, LookupError>;
}
