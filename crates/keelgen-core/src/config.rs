//! Configuration management for keelgen code generation.
//!
//! This module defines the `Config` struct and related functionality for managing
//! code generation settings. The configuration can be loaded from a YAML file,
//! created programmatically, or assembled from command-line arguments.
//!
//! # Examples
//!
//! ```no_run
//! use keelgen_core::config::Config;
//!
//! # #[tokio::main]
//! # async fn main() -> keelgen_core::Result<()> {
//! // Create a new config programmatically
//! let mut config = Config::new("keel", "openapi.yaml", "src/api");
//! config.exclude_operations.push("healthCheck".to_string());
//!
//! // Or load from a config file
//! let config = Config::from_file("keelgen.yaml").await?;
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::path::Path;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;
use url::Url;

/// Configuration for keelgen client generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Project name
    pub project_name: String,

    /// Path or http(s) URL of the OpenAPI document
    pub openapi_schema_path: String,

    /// Output directory for generated code
    pub output_dir: String,

    /// Template to use for code generation
    #[serde(default = "default_template")]
    pub template_kind: String,

    /// Optional path to template directory
    #[serde(default)]
    pub template_dir: Option<String>,

    /// Operations to generate; empty means all of them
    #[serde(default)]
    pub include_operations: Vec<String>,

    /// Operations to leave out
    #[serde(default)]
    pub exclude_operations: Vec<String>,

    /// Base URL joined with a relative `servers[0].url`
    #[serde(default)]
    pub base_url: Option<Url>,

    /// Component schema used as the error type when an operation declares none
    #[serde(default = "default_error_schema")]
    pub error_schema: String,

    /// Also write a dereferenced `schemas/{operation}.json` per operation
    #[serde(default)]
    pub emit_schemas: bool,
}

impl Config {
    /// Create a new Config with default values
    pub fn new(
        project_name: impl Into<String>,
        openapi_schema_path: impl Into<String>,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            openapi_schema_path: openapi_schema_path.into(),
            output_dir: output_dir.into(),
            template_kind: default_template(),
            template_dir: None,
            include_operations: Vec::new(),
            exclude_operations: Vec::new(),
            base_url: None,
            error_schema: default_error_schema(),
            emit_schemas: false,
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Whether an operation passes the include/exclude filters
    pub fn selects(&self, operation_id: &str) -> bool {
        let included = self.include_operations.is_empty()
            || self.include_operations.iter().any(|id| id == operation_id);
        included && !self.exclude_operations.iter().any(|id| id == operation_id)
    }
}

fn default_template() -> String {
    "rust_reqwest".to_string()
}

fn default_error_schema() -> String {
    "APIError".to_string()
}
