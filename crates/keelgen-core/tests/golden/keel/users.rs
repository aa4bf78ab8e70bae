//! Operations tagged `users` in Keel API 1.0.0.
//!
//! Generated by keelgen. Do not edit.
#[allow(unused_imports)]
use super::models::*;
/// The created user
pub type CreateUser201 = User;
/// The request was invalid
pub type CreateUser400 = ApiError;
/// The resource already exists
pub type CreateUser409 = ApiError;
pub type CreateUserBody = CreateUserRequest;
pub type CreateUserError = ApiError;
pub type CreateUserSuccess = CreateUser201;
/// The user was deleted
pub type DeleteUser204 = keelgen_runtime::Empty;
/// The resource does not exist
pub type DeleteUser404 = ApiError;
pub type DeleteUserError = ApiError;
/// Path parameters of `deleteUser`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeleteUserPathParams {
    pub id: i64,
}
pub type DeleteUserSuccess = DeleteUser204;
/// The user
pub type GetUser200 = User;
/// The resource does not exist
pub type GetUser404 = ApiError;
pub type GetUserError = ApiError;
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetUserItem200 {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}
/// The resource does not exist
pub type GetUserItem404 = ApiError;
pub type GetUserItemError = ApiError;
/// Path parameters of `getUserItem`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetUserItemPathParams {
    pub id: i64,
    #[serde(rename = "itemId")]
    pub item_id: String,
}
/// Query parameters of `getUserItem`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct GetUserItemQueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}
pub type GetUserItemSuccess = GetUserItem200;
/// Path parameters of `getUser`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetUserPathParams {
    pub id: i64,
}
pub type GetUserSuccess = GetUser200;
/// A page of users
pub type ListUsers200 = UserListResponse;
/// The request was invalid
pub type ListUsers400 = ApiError;
/// Unexpected server failure
pub type ListUsers500 = ApiError;
pub type ListUsersError = ApiError;
/// Query parameters of `listUsers`.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ListUsersQueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}
pub type ListUsersSuccess = ListUsers200;
/// The updated user
pub type UpdateUser200 = User;
/// The request was invalid
pub type UpdateUser400 = ApiError;
/// The resource does not exist
pub type UpdateUser404 = ApiError;
pub type UpdateUserBody = UpdateUserRequest;
pub type UpdateUserError = ApiError;
/// Path parameters of `updateUser`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateUserPathParams {
    pub id: i64,
}
pub type UpdateUserSuccess = UpdateUser200;
/// Endpoint of `createUser`.
pub const CREATE_USER_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "createUser",
    method: keelgen_runtime::Method::Post,
    path: "/api/users",
    tag: "users",
    path_params: &[],
    query_params: &[],
    has_body: true,
};
/// Arguments of `createUser`.
#[derive(Debug, Clone)]
pub struct CreateUserArgs {
    pub body: CreateUserBody,
    pub options: keelgen_runtime::CallOptions,
}
/// Create a user
///
/// `POST /api/users`
pub async fn create_user(
    client: &keelgen_runtime::ApiClient,
    args: CreateUserArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<CreateUserSuccess, CreateUserError>,
    keelgen_runtime::UsageError,
> {
    let mut request = CREATE_USER_ENDPOINT.request().with_options(&args.options);
    request.json_body(&args.body)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Mutation key of `createUser`.
pub fn create_user_mutation_key() -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&CREATE_USER_ENDPOINT)
}
/// Endpoint of `deleteUser`.
pub const DELETE_USER_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "deleteUser",
    method: keelgen_runtime::Method::Delete,
    path: "/api/users/{id}",
    tag: "users",
    path_params: &["id"],
    query_params: &[],
    has_body: false,
};
/// Arguments of `deleteUser`.
#[derive(Debug, Clone)]
pub struct DeleteUserArgs {
    pub path: DeleteUserPathParams,
    pub options: keelgen_runtime::CallOptions,
}
/// Delete a user
///
/// `DELETE /api/users/{id}`
#[deprecated]
pub async fn delete_user(
    client: &keelgen_runtime::ApiClient,
    args: DeleteUserArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<DeleteUserSuccess, DeleteUserError>,
    keelgen_runtime::UsageError,
> {
    let mut request = DELETE_USER_ENDPOINT.request().with_options(&args.options);
    request.path.insert("id", &args.path.id)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Mutation key of `deleteUser`.
pub fn delete_user_mutation_key() -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&DELETE_USER_ENDPOINT)
}
/// Endpoint of `getUser`.
pub const GET_USER_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "getUser",
    method: keelgen_runtime::Method::Get,
    path: "/api/users/{id}",
    tag: "users",
    path_params: &["id"],
    query_params: &[],
    has_body: false,
};
/// Arguments of `getUser`.
#[derive(Debug, Clone)]
pub struct GetUserArgs {
    pub path: GetUserPathParams,
    pub options: keelgen_runtime::CallOptions,
}
/// Get a user
///
/// `GET /api/users/{id}`
pub async fn get_user(
    client: &keelgen_runtime::ApiClient,
    args: GetUserArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<GetUserSuccess, GetUserError>,
    keelgen_runtime::UsageError,
> {
    let mut request = GET_USER_ENDPOINT.request().with_options(&args.options);
    request.path.insert("id", &args.path.id)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Cache key of a `getUser` call.
pub fn get_user_query_key(path: &GetUserPathParams) -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&GET_USER_ENDPOINT).with_path(path)
}
/// Endpoint of `getUserItem`.
pub const GET_USER_ITEM_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "getUserItem",
    method: keelgen_runtime::Method::Get,
    path: "/api/users/{id}/items/{itemId}",
    tag: "users",
    path_params: &["id", "itemId"],
    query_params: &["include"],
    has_body: false,
};
/// Arguments of `getUserItem`.
#[derive(Debug, Clone)]
pub struct GetUserItemArgs {
    pub path: GetUserItemPathParams,
    pub query: GetUserItemQueryParams,
    pub options: keelgen_runtime::CallOptions,
}
/// Get one item owned by a user
///
/// `GET /api/users/{id}/items/{itemId}`
pub async fn get_user_item(
    client: &keelgen_runtime::ApiClient,
    args: GetUserItemArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<GetUserItemSuccess, GetUserItemError>,
    keelgen_runtime::UsageError,
> {
    let mut request = GET_USER_ITEM_ENDPOINT.request().with_options(&args.options);
    request.path.insert("id", &args.path.id)?;
    request.path.insert("itemId", &args.path.item_id)?;
    request.params.push("include", &args.query.include)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Cache key of a `getUserItem` call.
pub fn get_user_item_query_key(
    path: &GetUserItemPathParams,
    query: &GetUserItemQueryParams,
) -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&GET_USER_ITEM_ENDPOINT)
        .with_path(path)
        .with_params(query)
}
/// Endpoint of `listUsers`.
pub const LIST_USERS_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "listUsers",
    method: keelgen_runtime::Method::Get,
    path: "/api/users",
    tag: "users",
    path_params: &[],
    query_params: &["page", "limit", "role"],
    has_body: false,
};
/// Arguments of `listUsers`.
#[derive(Debug, Clone, Default)]
pub struct ListUsersArgs {
    pub query: ListUsersQueryParams,
    pub options: keelgen_runtime::CallOptions,
}
/// List users
///
/// Returns one page of users, newest first.
///
/// `GET /api/users`
pub async fn list_users(
    client: &keelgen_runtime::ApiClient,
    args: ListUsersArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<ListUsersSuccess, ListUsersError>,
    keelgen_runtime::UsageError,
> {
    let mut request = LIST_USERS_ENDPOINT.request().with_options(&args.options);
    request.params.push("page", &args.query.page)?;
    request.params.push("limit", &args.query.limit)?;
    request.params.push("role", &args.query.role)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Cache key of a `listUsers` call.
pub fn list_users_query_key(query: &ListUsersQueryParams) -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&LIST_USERS_ENDPOINT).with_params(query)
}
/// Endpoint of `updateUser`.
pub const UPDATE_USER_ENDPOINT: keelgen_runtime::EndpointDescriptor = keelgen_runtime::EndpointDescriptor {
    operation_id: "updateUser",
    method: keelgen_runtime::Method::Put,
    path: "/api/users/{id}",
    tag: "users",
    path_params: &["id"],
    query_params: &[],
    has_body: true,
};
/// Arguments of `updateUser`.
#[derive(Debug, Clone)]
pub struct UpdateUserArgs {
    pub path: UpdateUserPathParams,
    pub body: UpdateUserBody,
    pub options: keelgen_runtime::CallOptions,
}
/// Update a user
///
/// `PUT /api/users/{id}`
pub async fn update_user(
    client: &keelgen_runtime::ApiClient,
    args: UpdateUserArgs,
) -> ::std::result::Result<
    keelgen_runtime::ResponseEnvelope<UpdateUserSuccess, UpdateUserError>,
    keelgen_runtime::UsageError,
> {
    let mut request = UPDATE_USER_ENDPOINT.request().with_options(&args.options);
    request.path.insert("id", &args.path.id)?;
    request.json_body(&args.body)?;
    client.call(request, args.options.cancel.as_ref()).await
}
/// Mutation key of `updateUser`.
pub fn update_user_mutation_key() -> keelgen_runtime::QueryKey {
    keelgen_runtime::QueryKey::new(&UPDATE_USER_ENDPOINT)
}
