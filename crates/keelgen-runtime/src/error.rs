//! Error types for the request runtime.
//!
//! Three failure classes are kept apart:
//!
//! - [`UsageError`]: the call was built wrong. Returned as `Err` before any
//!   network traffic.
//! - [`TransportError`]: no HTTP response was received. Carried inside
//!   [`crate::ResponseEnvelope::Transport`].
//! - [`ConfigError`]: the client itself could not be set up.

use thiserror::Error;

/// A call that cannot be turned into a request.
#[derive(Debug, Error)]
pub enum UsageError {
    /// A `{name}` slot in the path template has no value.
    #[error("missing required path parameter '{name}' for '{template}'")]
    MissingPathParameter { name: String, template: String },

    /// A path value was supplied for a slot the template does not have.
    #[error("path parameter '{name}' does not appear in '{template}'")]
    UnknownPathParameter { name: String, template: String },

    /// The path template itself is broken (unbalanced or empty braces).
    #[error("malformed path template '{template}': {reason}")]
    InvalidPathTemplate { template: String, reason: String },

    /// A parameter value is not representable as text.
    #[error("parameter '{name}' must be a primitive value, got {found}")]
    InvalidParameter { name: String, found: &'static str },

    /// A parameter value failed to serialize.
    #[error("failed to serialize parameter '{name}': {source}")]
    Parameter {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body failed to serialize.
    #[error("failed to serialize request body: {0}")]
    Body(#[source] serde_json::Error),

    /// A call-specific header has an invalid name or value.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The resolved URL does not parse.
    #[error("invalid request url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS resolution or TCP/TLS connection failed.
    #[error("failed to connect: {0}")]
    Connect(#[source] reqwest::Error),

    /// The underlying client gave up waiting.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// Any other failure before a response arrived.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    pub(crate) fn classify(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Request(err)
        }
    }
}

/// Client construction and configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is not an absolute URL.
    #[error("invalid base url '{url}': {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A default header has an invalid name or value.
    #[error("invalid default header '{name}': {reason}")]
    Header { name: String, reason: String },

    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// I/O error while reading a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (or JSON) parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// [`crate::init`] was called more than once.
    #[error("the global client is already initialized")]
    AlreadyInitialized,
}
