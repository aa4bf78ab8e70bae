//! OpenAPI document loading, validation and traversal.
//!
//! This module provides functionality for loading OpenAPI 3.0 documents from
//! files or URLs, checking their structure, resolving local `$ref` pointers and
//! listing their operations in a deterministic order.
//!
//! # Examples
//!
//! ```no_run
//! use keelgen_core::openapi::OpenApiContext;
//! use keelgen_core::error::Result;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let spec = OpenApiContext::from_file("openapi.yaml").await?;
//! spec.validate()?;
//! spec.check_references()?;
//!
//! for op in spec.parse_operations()? {
//!     println!("{} {} -> {}", op.method.to_uppercase(), op.path, op.id);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::{collections::BTreeMap, path::Path};

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::fs;

/// HTTP methods an OpenAPI path item can carry, in the order they are listed.
pub const METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

const MAX_REF_DEPTH: usize = 32;

/// Represents an OpenAPI document
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct OpenApiContext {
    /// The raw JSON value of the document
    pub json: JsonValue,
}

impl OpenApiContext {
    /// Load from a file or an http(s) URL (supports both YAML and JSON)
    pub async fn from_file_or_url<P: AsRef<str>>(location: P) -> crate::Result<Self> {
        let location = location.as_ref();

        if location.starts_with("http://") || location.starts_with("https://") {
            return Self::from_url(location).await;
        }

        Self::from_file(location).await
    }

    /// Load from a file (supports both YAML and JSON)
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::openapi(format!(
                "Failed to read OpenAPI document at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!(
                "Failed to parse OpenAPI document at {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Fetch from a URL (supports both YAML and JSON)
    pub async fn from_url(url: &str) -> crate::Result<Self> {
        let response = reqwest::get(url).await.map_err(|e| {
            Error::openapi(format!("Failed to fetch OpenAPI document from {}: {}", url, e))
        })?;

        if !response.status().is_success() {
            return Err(Error::openapi(format!(
                "Failed to fetch OpenAPI document from {}: HTTP {}",
                url,
                response.status()
            )));
        }

        let content = response.text().await.map_err(|e| {
            Error::openapi(format!("Failed to read response from {}: {}", url, e))
        })?;

        Self::parse_content(&content).map_err(|e| {
            Error::openapi(format!("Failed to parse OpenAPI document from {}: {}", url, e))
        })
    }

    /// Parse a document held in memory
    pub fn parse(content: &str) -> crate::Result<Self> {
        Self::parse_content(content).map_err(Error::openapi)
    }

    /// Parse content as either JSON or YAML
    fn parse_content(content: &str) -> Result<Self, String> {
        if let Ok(json) = serde_json::from_str(content) {
            return Ok(Self { json });
        }

        match serde_yaml::from_str(content) {
            Ok(json) => Ok(Self { json }),
            Err(e) => Err(format!("content is neither valid JSON nor YAML: {}", e)),
        }
    }

    /// Get a reference to the raw JSON value
    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    /// Get the title of the API
    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Get the version of the API
    pub fn version(&self) -> Option<&str> {
        self.json.get("info")?.get("version")?.as_str()
    }

    /// The first declared server URL, absolute or relative
    pub fn base_path(&self) -> Option<String> {
        self.json
            .get("servers")?
            .as_array()?
            .first()?
            .get("url")?
            .as_str()
            .map(String::from)
    }

    /// Check the version field and the overall OpenAPI 3.0 structure.
    pub fn validate(&self) -> crate::Result<()> {
        let version = self
            .json
            .get("openapi")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::openapi("missing 'openapi' version field"))?;
        if !(version == "3.0" || version.starts_with("3.0.")) {
            return Err(Error::openapi(format!(
                "unsupported OpenAPI version '{}', expected 3.0.x",
                version
            )));
        }

        serde_json::from_value::<openapiv3::OpenAPI>(self.json.clone()).map_err(|e| {
            Error::openapi(format!("document is not a valid OpenAPI 3.0 description: {}", e))
        })?;
        Ok(())
    }

    /// Verify that every `$ref` in the document is local and resolves.
    pub fn check_references(&self) -> crate::Result<()> {
        self.check_references_at(&self.json, "#")
    }

    fn check_references_at(&self, value: &JsonValue, location: &str) -> crate::Result<()> {
        match value {
            JsonValue::Object(map) => {
                if let Some(reference) = map.get("$ref").and_then(JsonValue::as_str) {
                    self.lookup(reference, location)?;
                }
                for (key, child) in map {
                    let child_location = format!("{}/{}", location, pointer_segment(key));
                    self.check_references_at(child, &child_location)?;
                }
            }
            JsonValue::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    self.check_references_at(child, &format!("{}/{}", location, i))?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Look up a single local reference.
    pub fn lookup(&self, reference: &str, location: &str) -> crate::Result<&JsonValue> {
        let pointer = reference
            .strip_prefix('#')
            .ok_or_else(|| Error::ExternalReference {
                reference: reference.to_string(),
                location: location.to_string(),
            })?;
        self.json
            .pointer(pointer)
            .ok_or_else(|| Error::UnresolvedReference {
                reference: reference.to_string(),
                location: location.to_string(),
            })
    }

    /// Follow `$ref` chains until a non-reference node is reached.
    pub fn resolve<'a>(&'a self, value: &'a JsonValue, location: &str) -> crate::Result<&'a JsonValue> {
        let mut current = value;
        for _ in 0..MAX_REF_DEPTH {
            match current.get("$ref").and_then(JsonValue::as_str) {
                Some(reference) => current = self.lookup(reference, location)?,
                None => return Ok(current),
            }
        }
        Err(Error::unsupported("reference cycle", location))
    }

    /// Entries of `components.schemas`, sorted by key
    pub fn component_schemas(&self) -> Vec<(&String, &JsonValue)> {
        let mut schemas: Vec<_> = self
            .json
            .pointer("/components/schemas")
            .and_then(JsonValue::as_object)
            .map(|schemas| schemas.iter().collect())
            .unwrap_or_default();
        schemas.sort_by(|a, b| a.0.cmp(b.0));
        schemas
    }

    /// List every operation, sorted by path then method.
    ///
    /// Path-level parameters are merged into each operation; an operation
    /// parameter with the same name and location replaces the shared one.
    pub fn parse_operations(&self) -> crate::Result<Vec<OpenApiOperation>> {
        let paths = self
            .json
            .get("paths")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| Error::openapi("Missing 'paths' object"))?;

        let mut paths: Vec<_> = paths.iter().collect();
        paths.sort_by(|a, b| a.0.cmp(b.0));

        let mut operations = Vec::new();
        let mut seen: BTreeMap<String, String> = BTreeMap::new();
        for (path, item) in paths {
            let item_location = format!("#/paths/{}", pointer_segment(path));
            let item = self.resolve(item, &item_location)?;
            let shared = self.collect_parameters(item.get("parameters"), &item_location)?;

            for method in METHODS {
                let Some(op) = item.get(method).and_then(JsonValue::as_object) else {
                    continue;
                };
                let location = format!("{}/{}", item_location, method);
                let label = format!("{} {}", method.to_uppercase(), path);

                let id = op
                    .get("operationId")
                    .and_then(JsonValue::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| {
                        format!(
                            "{}_{}",
                            method,
                            path.trim_start_matches('/').replace('/', "_")
                        )
                    });
                if let Some(first) = seen.insert(id.clone(), label.clone()) {
                    return Err(Error::DuplicateOperation {
                        operation_id: id,
                        first,
                        second: label,
                    });
                }

                let mut parameters = shared.clone();
                for param in self.collect_parameters(op.get("parameters"), &location)? {
                    match parameters
                        .iter_mut()
                        .find(|p| p.name == param.name && p.in_ == param.in_)
                    {
                        Some(existing) => *existing = param,
                        None => parameters.push(param),
                    }
                }

                let request_body = op
                    .get("requestBody")
                    .map(|body| self.resolve(body, &format!("{}/requestBody", location)))
                    .transpose()?
                    .cloned();

                let mut responses = BTreeMap::new();
                if let Some(map) = op.get("responses").and_then(JsonValue::as_object) {
                    for (status, response) in map {
                        let response_location =
                            format!("{}/responses/{}", location, pointer_segment(status));
                        let response = self.resolve(response, &response_location)?;
                        responses.insert(status.clone(), response.clone());
                    }
                }

                let tags = op
                    .get("tags")
                    .and_then(JsonValue::as_array)
                    .map(|arr| {
                        arr.iter()
                            .filter_map(JsonValue::as_str)
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default();

                operations.push(OpenApiOperation {
                    id,
                    method: method.to_string(),
                    path: path.clone(),
                    tags,
                    summary: op.get("summary").and_then(JsonValue::as_str).map(String::from),
                    description: op
                        .get("description")
                        .and_then(JsonValue::as_str)
                        .map(String::from),
                    deprecated: op
                        .get("deprecated")
                        .and_then(JsonValue::as_bool)
                        .unwrap_or(false),
                    parameters,
                    request_body,
                    responses,
                    location,
                });
            }
        }
        log::debug!("Found {} operations", operations.len());
        Ok(operations)
    }

    fn collect_parameters(
        &self,
        parameters: Option<&JsonValue>,
        location: &str,
    ) -> crate::Result<Vec<OpenApiParameter>> {
        let Some(items) = parameters.and_then(JsonValue::as_array) else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let param_location = format!("{}/parameters/{}", location, i);
                let resolved = self.resolve(param, &param_location)?;
                let mut parsed: OpenApiParameter = serde_json::from_value(resolved.clone())
                    .map_err(|e| {
                        Error::openapi(format!("Invalid parameter at {}: {}", param_location, e))
                    })?;
                parsed.location = param_location;
                Ok(parsed)
            })
            .collect()
    }

    /// Inline every `$ref` below `value`. References that would recurse into
    /// themselves are left in place.
    pub fn dereference(&self, value: &JsonValue) -> crate::Result<JsonValue> {
        self.dereference_inner(value, &mut Vec::new())
    }

    fn dereference_inner(&self, value: &JsonValue, stack: &mut Vec<String>) -> crate::Result<JsonValue> {
        match value {
            JsonValue::Object(map) => {
                if let Some(reference) = map.get("$ref").and_then(JsonValue::as_str) {
                    if stack.iter().any(|r| r == reference) {
                        return Ok(value.clone());
                    }
                    let target = self.lookup(reference, reference)?;
                    stack.push(reference.to_string());
                    let inlined = self.dereference_inner(target, stack);
                    stack.pop();
                    return inlined;
                }
                let mut out = Map::new();
                for (key, child) in map {
                    out.insert(key.clone(), self.dereference_inner(child, stack)?);
                }
                Ok(JsonValue::Object(out))
            }
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.dereference_inner(item, stack))
                .collect::<crate::Result<Vec<_>>>()
                .map(JsonValue::Array),
            other => Ok(other.clone()),
        }
    }
}

/// Escape a key for use in a JSON pointer.
pub fn pointer_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

/// One operation of the document with its references resolved one level deep.
#[derive(Clone, Debug, Serialize)]
pub struct OpenApiOperation {
    /// The operationId, or `{method}_{path}` when the document has none
    pub id: String,
    /// Lowercase HTTP method
    pub method: String,
    /// The path template (e.g., "/api/users/{id}")
    pub path: String,
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    /// Path-level and operation-level parameters, in declaration order
    pub parameters: Vec<OpenApiParameter>,
    pub request_body: Option<JsonValue>,
    /// Response objects keyed by status code
    pub responses: BTreeMap<String, JsonValue>,
    /// JSON pointer of the operation object
    pub location: String,
}

/// Information about a single parameter in an OpenAPI operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OpenApiParameter {
    /// The name of the parameter. Parameter names are case sensitive.
    pub name: String,
    /// The location of the parameter: "query", "header", "path", or "cookie".
    #[serde(rename = "in")]
    pub in_: String,
    pub description: Option<String>,
    /// Path parameters are always required; others default to optional.
    pub required: Option<bool>,
    pub deprecated: Option<bool>,
    /// The schema defining the type used for the parameter.
    pub schema: Option<JsonValue>,
    /// Media-type based serialization, which is not supported.
    pub content: Option<JsonValue>,
    /// JSON pointer of the parameter object
    #[serde(skip)]
    pub location: String,
}
