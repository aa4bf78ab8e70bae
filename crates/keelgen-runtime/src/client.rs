//! The HTTP client handle.
//!
//! [`ApiClient`] is the only type in the workspace that touches the network.
//! It is cheap to clone; clones share one connection pool and one immutable
//! [`ClientConfig`].

// Internal imports (std, crate)
use std::sync::Arc;

use crate::{
    config::ClientConfig,
    envelope::{Failure, ResponseEnvelope, Success},
    error::{ConfigError, TransportError, UsageError},
    request::{RequestConfig, ResponseType},
};

// External imports (alphabetized)
use once_cell::sync::OnceCell;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn, Span};
use url::Url;

static GLOBAL: OnceCell<ApiClient> = OnceCell::new();

/// Install the process-wide client. Fails if one is already installed.
pub fn init(config: ClientConfig) -> Result<&'static ApiClient, ConfigError> {
    let client = ApiClient::new(config)?;
    GLOBAL
        .set(client)
        .map_err(|_| ConfigError::AlreadyInitialized)?;
    GLOBAL.get().ok_or(ConfigError::AlreadyInitialized)
}

/// The client installed by [`init`], if any.
pub fn global() -> Option<&'static ApiClient> {
    GLOBAL.get()
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    default_headers: HeaderMap,
}

impl ApiClient {
    /// Build a client with its own connection pool and no request timeout.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(ConfigError::Client)?;
        Self::with_http_client(config, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self, ConfigError> {
        let default_headers = config.header_map()?;
        Ok(Self {
            inner: Arc::new(Inner {
                http,
                config,
                default_headers,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.config.base_url
    }

    /// Issue one request and normalize its outcome.
    ///
    /// Returns `Err` only when the request cannot be built; every network or
    /// application outcome is a [`ResponseEnvelope`] variant.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    pub async fn execute(
        &self,
        request: RequestConfig,
        cancel: Option<&CancellationToken>,
    ) -> Result<ResponseEnvelope<Value, Value>, UsageError> {
        let url = request.resolve_url(self.base_url())?;
        Span::current().record("http.url", url.as_str());

        let headers = request.merged_headers(&self.inner.default_headers)?;
        let body = request
            .body
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(UsageError::Body)?;

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            debug!("request cancelled before it was sent");
            return Ok(ResponseEnvelope::Aborted);
        }

        let mut builder = self
            .inner
            .http
            .request(request.method.to_reqwest(), url)
            .headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let exchange = exchange(builder, request.response_type);
        let envelope = match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!("request aborted");
                        ResponseEnvelope::Aborted
                    }
                    envelope = exchange => envelope,
                }
            }
            None => exchange.await,
        };

        if let Some(status) = envelope.status() {
            Span::current().record("http.status_code", status.as_u16());
        }
        Ok(envelope)
    }

    /// [`ApiClient::execute`] narrowed to the declared success and error types.
    pub async fn call<T, E>(
        &self,
        request: RequestConfig,
        cancel: Option<&CancellationToken>,
    ) -> Result<ResponseEnvelope<T, E>, UsageError>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        Ok(self.execute(request, cancel).await?.narrow())
    }
}

async fn exchange(
    builder: reqwest::RequestBuilder,
    response_type: ResponseType,
) -> ResponseEnvelope<Value, Value> {
    let response = match builder.send().await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "request failed without a response");
            return ResponseEnvelope::Transport(TransportError::classify(err));
        }
    };

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = match response.bytes().await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, status = status.as_u16(), "failed to read response body");
            return ResponseEnvelope::Transport(TransportError::classify(err));
        }
    };
    debug!(status = status.as_u16(), "response received");

    if status.is_success() {
        ResponseEnvelope::Success(Success {
            data: decode_body(&bytes, response_type),
            status,
            headers,
        })
    } else {
        // Error bodies follow the error schema, which is always JSON.
        let body = decode_body(&bytes, ResponseType::Json);
        ResponseEnvelope::Error(Failure {
            error: Some(body.clone()),
            body,
            status,
            headers,
        })
    }
}

fn decode_body(bytes: &[u8], response_type: ResponseType) -> Value {
    match response_type {
        ResponseType::Json => {
            serde_json::from_slice(bytes).unwrap_or_else(|_| Value::Object(Map::new()))
        }
        ResponseType::Text => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_and_invalid_bodies_fall_back_to_empty_object() {
        assert_eq!(decode_body(b"", ResponseType::Json), json!({}));
        assert_eq!(decode_body(b"<html>", ResponseType::Json), json!({}));
        assert_eq!(decode_body(b"[1]", ResponseType::Json), json!([1]));
    }

    #[test]
    fn text_bodies_are_kept_verbatim() {
        assert_eq!(decode_body(b"ok", ResponseType::Text), json!("ok"));
    }

    #[tokio::test]
    async fn error_bodies_are_json_even_for_text_operations() {
        use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(503).set_body_json(json!({"code": "INTERNAL_ERROR"})),
            )
            .mount(&server)
            .await;

        let http = reqwest::Client::new();
        let builder = http.get(server.uri());
        match exchange(builder, ResponseType::Text).await {
            ResponseEnvelope::Error(failure) => {
                assert_eq!(failure.error, Some(json!({"code": "INTERNAL_ERROR"})));
                assert_eq!(failure.body, json!({"code": "INTERNAL_ERROR"}));
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn clones_share_configuration() {
        let client = ApiClient::new(ClientConfig::parse("http://localhost:8080").unwrap()).unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
        assert_eq!(clone.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn global_client_is_set_once() {
        let config = ClientConfig::parse("http://localhost:8080").unwrap();
        let first = init(config.clone()).unwrap();
        assert_eq!(global().map(|c| c.base_url()), Some(first.base_url()));
        assert!(matches!(init(config), Err(ConfigError::AlreadyInitialized)));
    }
}
