//! Client configuration.
//!
//! A [`ClientConfig`] carries the base URL and the default headers that every
//! request made through one [`crate::ApiClient`] shares. It is moved into the
//! client on construction and never mutated afterwards.

// Internal imports (std, crate)
use std::{collections::BTreeMap, path::Path};

use crate::error::ConfigError;

// External imports (alphabetized)
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

/// Base URL and default headers for an [`crate::ApiClient`].
///
/// When loaded from a file, unknown keys are rejected:
///
/// ```yaml
/// baseUrl: http://localhost:8080
/// headers:
///   x-app: keel
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ClientConfig {
    /// Absolute URL that every path template is appended to.
    pub base_url: Url,

    /// Headers sent with every request unless a call overrides them.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl ClientConfig {
    /// Create a configuration with no default headers.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: BTreeMap::new(),
        }
    }

    /// Parse `base_url` and create a configuration with no default headers.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url).map_err(|source| ConfigError::BaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self::new(url))
    }

    /// Add a default header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parse a YAML (or JSON) document.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load a configuration file. JSON is accepted as well since it is valid YAML.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_yaml_str(&content)
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap, ConfigError> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::Header {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| ConfigError::Header {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            map.insert(header_name, header_value);
        }
        Ok(map)
    }
}
