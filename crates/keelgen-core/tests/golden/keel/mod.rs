//! Typed client for Keel API 1.0.0.
//!
//! Generated by keelgen. Do not edit.
pub mod models;
pub mod health;
pub mod users;
pub use keelgen_runtime::{ApiClient, CallOptions, ClientConfig, ResponseEnvelope};
/// Server URL declared by the API document.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Every endpoint of the API, grouped by module.
pub const ENDPOINTS: &[keelgen_runtime::EndpointDescriptor] = &[
    health::HEALTH_CHECK_ENDPOINT,
    users::CREATE_USER_ENDPOINT,
    users::DELETE_USER_ENDPOINT,
    users::GET_USER_ENDPOINT,
    users::GET_USER_ITEM_ENDPOINT,
    users::LIST_USERS_ENDPOINT,
    users::UPDATE_USER_ENDPOINT,
];
