//! Schema types of Keel API 1.0.0.
//!
//! Generated by keelgen. Do not edit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    pub code: ApiErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub message: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
}
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize
)]
pub enum ApiErrorCode {
    #[serde(rename = "VALIDATION_ERROR")]
    ValidationError,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "CONFLICT")]
    Conflict,
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
}
impl ApiErrorCode {
    /// Every value, in declaration order.
    pub const ALL: &'static [ApiErrorCode] = &[
        ApiErrorCode::ValidationError,
        ApiErrorCode::NotFound,
        ApiErrorCode::Conflict,
        ApiErrorCode::InternalError,
        ApiErrorCode::BadRequest,
    ];
    /// The value as sent on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ApiErrorCode::ValidationError => "VALIDATION_ERROR",
            ApiErrorCode::NotFound => "NOT_FOUND",
            ApiErrorCode::Conflict => "CONFLICT",
            ApiErrorCode::InternalError => "INTERNAL_ERROR",
            ApiErrorCode::BadRequest => "BAD_REQUEST",
        }
    }
}
impl ::std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.write_str(self.as_str())
    }
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Manager {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Box<OrgUnit>>,
    #[serde(rename = "userId")]
    pub user_id: i64,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrgUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Box<Manager>>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<OrgUnit>>,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pagination {
    pub limit: i32,
    pub page: i32,
    pub total: i64,
}
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    /// Creation time, RFC 3339
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "displayName", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub email: String,
    pub id: i64,
    pub role: UserRole,
}
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserListResponse {
    pub data: Vec<User>,
    pub pagination: Pagination,
}
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize
)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "guest")]
    Guest,
}
impl UserRole {
    /// Every value, in declaration order.
    pub const ALL: &'static [UserRole] = &[
        UserRole::Admin,
        UserRole::Member,
        UserRole::Guest,
    ];
    /// The value as sent on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Member => "member",
            UserRole::Guest => "guest",
        }
    }
}
impl ::std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        f.write_str(self.as_str())
    }
}
