//! Request descriptors.
//!
//! A [`RequestConfig`] is the closed description of one HTTP call: method,
//! path template, parameters, body and call-specific headers. Generated code
//! builds one per call from its typed arguments; [`RequestConfig::resolve_url`]
//! turns it into the concrete URL.

// Internal imports (std, crate)
use std::{collections::BTreeMap, fmt};

use crate::error::UsageError;

// External imports (alphabetized)
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl Method {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
            Method::Head => "HEAD",
            Method::Patch => "PATCH",
            Method::Trace => "TRACE",
        }
    }

    /// Reads are cacheable queries; everything else is a mutation.
    pub const fn kind(&self) -> OperationKind {
        match self {
            Method::Get | Method::Head | Method::Options => OperationKind::Query,
            _ => OperationKind::Mutation,
        }
    }

    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
            Method::Head => reqwest::Method::HEAD,
            Method::Patch => reqwest::Method::PATCH,
            Method::Trace => reqwest::Method::TRACE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a data-fetching cache should treat an operation as a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
}

/// How the response body becomes the envelope's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Parse as JSON, `{}` when empty or unparsable.
    #[default]
    Json,
    /// Keep the body as a JSON string.
    Text,
}

/// Static metadata for one operation, emitted as a `const` by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub operation_id: &'static str,
    pub method: Method,
    /// Path template, e.g. `/api/users/{id}`.
    pub path: &'static str,
    /// Module the operation is grouped under.
    pub tag: &'static str,
    /// Path parameter names in template order.
    pub path_params: &'static [&'static str],
    /// Query parameter names in declaration order.
    pub query_params: &'static [&'static str],
    pub has_body: bool,
}

impl EndpointDescriptor {
    pub const fn kind(&self) -> OperationKind {
        self.method.kind()
    }

    /// Start a request for this endpoint.
    pub fn request(&self) -> RequestConfig {
        RequestConfig::new(self.method, self.path)
    }
}

/// Values for the `{name}` slots of a path template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    values: Vec<(String, String)>,
}

impl PathParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot from any primitive value. A `None`/null value leaves the
    /// slot unset, which fails at resolution time if the template needs it.
    pub fn insert<V: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
    ) -> Result<&mut Self, UsageError> {
        let Some(text) = primitive_text(name, serialize_param(name, value)?)? else {
            return Ok(self);
        };
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = text,
            None => self.values.push((name.to_string(), text)),
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Ordered query string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. `None`/null is skipped, arrays repeat the key,
    /// objects are rejected.
    pub fn push<V: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &V,
    ) -> Result<&mut Self, UsageError> {
        match serialize_param(name, value)? {
            Value::Array(items) => {
                for item in items {
                    if let Value::Array(_) = item {
                        return Err(UsageError::InvalidParameter {
                            name: name.to_string(),
                            found: "nested array",
                        });
                    }
                    if let Some(text) = primitive_text(name, item)? {
                        self.pairs.push((name.to_string(), text));
                    }
                }
            }
            other => {
                if let Some(text) = primitive_text(name, other)? {
                    self.pairs.push((name.to_string(), text));
                }
            }
        }
        Ok(self)
    }

    /// Append every field of a serializable struct, sorted by key.
    pub fn extend_from<V: Serialize + ?Sized>(&mut self, value: &V) -> Result<&mut Self, UsageError> {
        match serialize_param("query", value)? {
            Value::Object(fields) => {
                for (name, field) in fields {
                    self.push(&name, &field)?;
                }
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(UsageError::InvalidParameter {
                name: "query".to_string(),
                found: json_kind(&other),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The form-urlencoded query string, or `None` when there are no pairs.
    pub fn to_query_string(&self) -> Option<String> {
        if self.pairs.is_empty() {
            return None;
        }
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.pairs {
            serializer.append_pair(name, value);
        }
        Some(serializer.finish())
    }
}

/// Per-call options accepted by every generated function.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Headers for this call only; they override the client defaults.
    pub headers: BTreeMap<String, String>,
    /// Cancelling this token resolves the call to [`crate::ResponseEnvelope::Aborted`].
    pub cancel: Option<CancellationToken>,
}

impl CallOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Everything the runtime needs to issue one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestConfig {
    pub method: Method,
    /// Path template relative to the base URL, e.g. `/api/users/{id}`.
    pub url: String,
    pub path: PathParams,
    pub params: QueryParams,
    /// JSON body. When present the request carries `content-type: application/json`.
    pub body: Option<Value>,
    /// Call-specific headers; override client defaults case-insensitively.
    pub headers: BTreeMap<String, String>,
    pub response_type: ResponseType,
}

impl RequestConfig {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            path: PathParams::new(),
            params: QueryParams::new(),
            body: None,
            headers: BTreeMap::new(),
            response_type: ResponseType::Json,
        }
    }

    /// Serialize `body` as the JSON request body.
    pub fn json_body<B: Serialize + ?Sized>(&mut self, body: &B) -> Result<&mut Self, UsageError> {
        self.body = Some(serde_json::to_value(body).map_err(UsageError::Body)?);
        Ok(self)
    }

    /// Merge call options into this request.
    pub fn with_options(mut self, options: &CallOptions) -> Self {
        self.headers
            .extend(options.headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Substitute path parameters into the template, percent-encoding each value.
    pub fn resolve_path(&self) -> Result<String, UsageError> {
        let template = self.url.as_str();
        let invalid = |reason: &str| UsageError::InvalidPathTemplate {
            template: template.to_string(),
            reason: reason.to_string(),
        };

        let mut resolved = String::with_capacity(template.len());
        let mut used: Vec<&str> = Vec::new();
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            let literal = &rest[..open];
            if literal.contains('}') {
                return Err(invalid("unmatched '}'"));
            }
            resolved.push_str(literal);

            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| invalid("unclosed '{'"))?;
            let name = &after[..close];
            if name.is_empty() {
                return Err(invalid("empty parameter name"));
            }
            if name.contains('{') {
                return Err(invalid("nested '{'"));
            }

            let value = self
                .path
                .get(name)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| UsageError::MissingPathParameter {
                    name: name.to_string(),
                    template: template.to_string(),
                })?;
            resolved.push_str(&urlencoding::encode(value));
            used.push(name);
            rest = &after[close + 1..];
        }
        if rest.contains('}') {
            return Err(invalid("unmatched '}'"));
        }
        resolved.push_str(rest);

        if let Some((name, _)) = self.path.iter().find(|(n, _)| !used.contains(n)) {
            return Err(UsageError::UnknownPathParameter {
                name: name.to_string(),
                template: template.to_string(),
            });
        }
        Ok(resolved)
    }

    /// Join the resolved path and query string onto `base`.
    ///
    /// The base path is kept as a prefix and any base query pairs come before
    /// the request's own. A base fragment is dropped.
    pub fn resolve_url(&self, base: &Url) -> Result<Url, UsageError> {
        if base.cannot_be_a_base() {
            return Err(UsageError::InvalidUrl {
                url: base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        let path = self.resolve_path()?;

        let mut url = base.clone();
        url.set_fragment(None);
        url.set_path(&format!(
            "{}/{}",
            base.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        ));
        let query = match (
            base.query().filter(|q| !q.is_empty()),
            self.params.to_query_string(),
        ) {
            (Some(fixed), Some(own)) => Some(format!("{fixed}&{own}")),
            (fixed, own) => own.or_else(|| fixed.map(str::to_string)),
        };
        url.set_query(query.as_deref());
        Ok(url)
    }

    /// Client defaults overlaid with this request's headers.
    pub(crate) fn merged_headers(&self, defaults: &HeaderMap) -> Result<HeaderMap, UsageError> {
        let mut headers = defaults.clone();
        for (name, value) in &self.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| UsageError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| UsageError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }
        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

fn serialize_param<V: Serialize + ?Sized>(name: &str, value: &V) -> Result<Value, UsageError> {
    serde_json::to_value(value).map_err(|source| UsageError::Parameter {
        name: name.to_string(),
        source,
    })
}

fn primitive_text(name: &str, value: Value) -> Result<Option<String>, UsageError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(UsageError::InvalidParameter {
            name: name.to_string(),
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("http://localhost:8080").unwrap()
    }

    #[test]
    fn single_path_param_joins_base_url() {
        let mut request = RequestConfig::new(Method::Get, "/api/users/{id}");
        request.path.insert("id", &42).unwrap();
        let url = request.resolve_url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users/42");
    }

    #[test]
    fn base_path_is_kept_and_trailing_slash_trimmed() {
        let base = Url::parse("https://api.example.com/v1/").unwrap();
        let request = RequestConfig::new(Method::Get, "/health");
        assert_eq!(
            request.resolve_url(&base).unwrap().as_str(),
            "https://api.example.com/v1/health"
        );
    }

    #[test]
    fn base_query_and_fragment_do_not_swallow_the_path() {
        let base = Url::parse("https://api.example.com/v1?tenant=acme#docs").unwrap();
        let mut request = RequestConfig::new(Method::Get, "/api/users/{id}");
        request.path.insert("id", "7").unwrap();
        assert_eq!(
            request.resolve_url(&base).unwrap().as_str(),
            "https://api.example.com/v1/api/users/7?tenant=acme"
        );

        request.params.push("page", &2).unwrap();
        assert_eq!(
            request.resolve_url(&base).unwrap().as_str(),
            "https://api.example.com/v1/api/users/7?tenant=acme&page=2"
        );
    }

    #[test]
    fn two_path_params_and_optional_query() {
        let mut request = RequestConfig::new(Method::Get, "/api/users/{id}/items/{itemId}");
        request.path.insert("id", "u 1").unwrap();
        request.path.insert("itemId", &7).unwrap();
        request.params.push("filter", &None::<String>).unwrap();

        let url = request.resolve_url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users/u%201/items/7");
        assert_eq!(url.query(), None);

        request.params.push("filter", "café & co").unwrap();
        let url = request.resolve_url(&base()).unwrap();
        assert_eq!(url.query(), Some("filter=caf%C3%A9+%26+co"));
    }

    #[test]
    fn path_values_are_percent_encoded() {
        let mut request = RequestConfig::new(Method::Get, "/files/{name}");
        request.path.insert("name", "a/b?c").unwrap();
        assert_eq!(request.resolve_path().unwrap(), "/files/a%2Fb%3Fc");
    }

    #[test]
    fn query_values_render_as_text_in_insertion_order() {
        let mut params = QueryParams::new();
        params
            .push("page", &2)
            .unwrap()
            .push("active", &true)
            .unwrap()
            .push("ratio", &0.5)
            .unwrap()
            .push("id", &vec![1, 2])
            .unwrap();
        assert_eq!(
            params.to_query_string().as_deref(),
            Some("page=2&active=true&ratio=0.5&id=1&id=2")
        );
    }

    #[test]
    fn query_struct_fields_are_flattened() {
        #[derive(Serialize)]
        struct ListQuery {
            page: Option<i32>,
            limit: Option<i32>,
        }

        let mut params = QueryParams::new();
        params
            .extend_from(&ListQuery {
                page: Some(1),
                limit: None,
            })
            .unwrap();
        assert_eq!(params.to_query_string().as_deref(), Some("page=1"));
    }

    #[test]
    fn empty_query_has_no_question_mark() {
        let request = RequestConfig::new(Method::Get, "/api/users");
        let url = request.resolve_url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users");
    }

    #[test]
    fn object_query_value_is_rejected() {
        let mut params = QueryParams::new();
        let err = params.push("filter", &json!({"a": 1})).unwrap_err();
        assert!(matches!(err, UsageError::InvalidParameter { found: "object", .. }));
    }

    #[test]
    fn nested_array_query_value_is_rejected() {
        let mut params = QueryParams::new();
        let err = params.push("ids", &json!([[1], [2]])).unwrap_err();
        assert!(matches!(err, UsageError::InvalidParameter { found: "nested array", .. }));
    }

    #[test]
    fn missing_path_param_is_a_usage_error() {
        let request = RequestConfig::new(Method::Get, "/api/users/{id}");
        let err = request.resolve_path().unwrap_err();
        assert!(matches!(err, UsageError::MissingPathParameter { ref name, .. } if name == "id"));
    }

    #[test]
    fn empty_path_param_is_a_usage_error() {
        let mut request = RequestConfig::new(Method::Get, "/api/users/{id}");
        request.path.insert("id", "").unwrap();
        assert!(matches!(
            request.resolve_path(),
            Err(UsageError::MissingPathParameter { .. })
        ));
    }

    #[test]
    fn extra_path_param_is_a_usage_error() {
        let mut request = RequestConfig::new(Method::Get, "/api/users");
        request.path.insert("id", "1").unwrap();
        assert!(matches!(
            request.resolve_path(),
            Err(UsageError::UnknownPathParameter { .. })
        ));
    }

    #[test]
    fn malformed_templates_are_rejected() {
        for template in ["/api/{id", "/api/id}", "/api/{}"] {
            let request = RequestConfig::new(Method::Get, template);
            assert!(
                matches!(
                    request.resolve_path(),
                    Err(UsageError::InvalidPathTemplate { .. })
                ),
                "{template}"
            );
        }
    }

    #[test]
    fn call_headers_override_defaults_case_insensitively() {
        let mut defaults = HeaderMap::new();
        defaults.insert("x-app", HeaderValue::from_static("default"));

        let mut request = RequestConfig::new(Method::Post, "/api/users");
        request.headers.insert("X-App".to_string(), "call".to_string());
        request.json_body(&json!({"name": "a"})).unwrap();

        let headers = request.merged_headers(&defaults).unwrap();
        assert_eq!(headers.get("x-app").unwrap(), "call");
        assert_eq!(headers.get_all("x-app").iter().count(), 1);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn no_content_type_without_body() {
        let request = RequestConfig::new(Method::Get, "/api/users");
        let headers = request.merged_headers(&HeaderMap::new()).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn method_kind() {
        assert_eq!(Method::Get.kind(), OperationKind::Query);
        assert_eq!(Method::Delete.kind(), OperationKind::Mutation);
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }
}
