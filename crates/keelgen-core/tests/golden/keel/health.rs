//! Operations tagged `health` in Keel API 1.0.0.
//!
//! Generated by keelgen. Do not edit.
#[allow(unused_imports)]
use super::models::*;
/// Service is up
pub type HealthCheck200 = String;
pub type HealthCheckError = ApiError;
pub type HealthCheckSuccess = HealthCheck200;
/// Endpoint of `healthCheck`.
pub const HEALTH_CHECK_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "healthCheck",
    method: keelgen_runtime::Method::Get,
    path: "/health",
    tag: "health",
    path_params: &[],
    query_params: &[],
    has_body: false,
};
/// Arguments of `healthCheck`.
#[derive(Debug, Clone, Default)]
pub struct HealthCheckArgs {
    pub options: keelgen_runtime::CallOptions,
}
/// Liveness probe
///
/// `GET /health`
pub async fn health_check(
    client: &keelgen_runtime::ApiClient,
    args: HealthCheckArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<HealthCheckSuccess, HealthCheckError>,
    keelgen_runtime::UsageError,
> {
    let mut request = HEALTH_CHECK_ENDPOINT.request().with_options(&args.options);
    request.response_type = keelgen_runtime::ResponseType::Text;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Cache key of a `healthCheck` call.
pub fn health_check_query_key() -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&HEALTH_CHECK_ENDPOINT)
}
