//! keelgen runtime
//!
//! The request pipeline behind clients generated by `keelgen`. Generated
//! call sites build a [`RequestConfig`] from their typed arguments and hand it
//! to an [`ApiClient`], which issues exactly one HTTP request and returns a
//! [`ResponseEnvelope`]. Network and application failures are values in the
//! envelope; only malformed call construction is reported as a
//! [`UsageError`].
//!
//! ```no_run
//! use keelgen_runtime::{ApiClient, ClientConfig, Method, RequestConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ClientConfig::parse("http://localhost:8080")?)?;
//!
//! let mut request = RequestConfig::new(Method::Get, "/api/users/{id}");
//! request.path.insert("id", "42")?;
//!
//! let envelope = client.execute(request, None).await?;
//! match envelope.status() {
//!     Some(status) => println!("server answered {status}"),
//!     None => println!("no response"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod key;
pub mod request;

pub use crate::{
    client::{global, init, ApiClient},
    config::ClientConfig,
    envelope::{Empty, Failure, Malformed, ResponseEnvelope, Success},
    error::{ConfigError, TransportError, UsageError},
    key::QueryKey,
    request::{
        CallOptions, EndpointDescriptor, Method, OperationKind, PathParams, QueryParams,
        RequestConfig, ResponseType,
    },
};

pub use reqwest::{header::HeaderMap, StatusCode};
pub use tokio_util::sync::CancellationToken;
