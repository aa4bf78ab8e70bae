//! Error handling for the keelgen code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. Every generation error is fatal:
//! when one is returned nothing has been written to the output directory.
//!
//! # Examples
//!
//! ```
//! use keelgen_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::unsupported("anyOf", "#/components/schemas/Pet"))
//! }
//!
//! assert!(might_fail().unwrap_err().to_string().contains("anyOf"));
//! ```

use thiserror::Error;

/// Result type for keelgen generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for keelgen generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document could not be loaded or is not OpenAPI 3.0
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// A `$ref` points at nothing
    #[error("unresolved reference '{reference}' at {location}")]
    UnresolvedReference { reference: String, location: String },

    /// A `$ref` points outside the document
    #[error("external reference '{reference}' at {location} is not supported")]
    ExternalReference { reference: String, location: String },

    /// A schema construct the generator cannot express
    #[error("unsupported {construct} at {location}")]
    Unsupported { construct: String, location: String },

    /// Two operations share an operationId
    #[error("duplicate operationId '{operation_id}' on {first} and {second}")]
    DuplicateOperation {
        operation_id: String,
        first: String,
        second: String,
    },

    /// Two schema nodes map to the same generated type name
    #[error("generated type name '{name}' is produced by both {first} and {second}")]
    DuplicateType {
        name: String,
        first: String,
        second: String,
    },

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// A rendered Rust file does not parse
    #[error("generated file '{file}' is not valid Rust: {message}")]
    InvalidOutput { file: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create an unsupported-construct error
    pub fn unsupported(construct: impl Into<String>, location: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            location: location.into(),
        }
    }
}
