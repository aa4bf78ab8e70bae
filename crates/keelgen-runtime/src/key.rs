//! Cache keys for data-fetching layers.
//!
//! A [`QueryKey`] identifies a call the way client-side caches expect:
//! `[{"url": "/api/users/:id", "params": {"id": "42"}}, {"page": 1}]`.

// External imports (alphabetized)
use serde::Serialize;
use serde_json::{Map, Value};

use crate::request::EndpointDescriptor;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct QueryKey(Vec<Value>);

impl QueryKey {
    /// Key with only the endpoint's path, `{name}` slots written as `:name`.
    pub fn new(endpoint: &EndpointDescriptor) -> Self {
        let mut head = Map::new();
        head.insert("url".to_string(), Value::String(express_path(endpoint.path)));
        Self(vec![Value::Object(head)])
    }

    /// Attach path parameter values to the head element.
    pub fn with_path<P: Serialize + ?Sized>(mut self, path: &P) -> Self {
        let value = serde_json::to_value(path).unwrap_or_default();
        if let Some(Value::Object(head)) = self.0.first_mut() {
            head.insert("params".to_string(), value);
        }
        self
    }

    /// Append query parameters, skipped when they serialize to nothing.
    pub fn with_params<Q: Serialize + ?Sized>(mut self, params: &Q) -> Self {
        match serde_json::to_value(params).unwrap_or_default() {
            Value::Null => {}
            Value::Object(map) if map.is_empty() => {}
            value => self.0.push(value),
        }
        self
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.0.clone())
    }
}

fn express_path(template: &str) -> String {
    let mut out = String::with_capacity(template.len());
    let mut in_slot = false;
    for c in template.chars() {
        match c {
            '{' => {
                in_slot = true;
                out.push(':');
            }
            '}' if in_slot => in_slot = false,
            _ => out.push(c),
        }
    }
    out
}
