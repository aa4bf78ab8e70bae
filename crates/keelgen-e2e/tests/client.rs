//! Calls through the generated client against a mock server.

// External imports (alphabetized)
use keelgen_e2e::api::{
    self, health,
    models::{ApiErrorCode, CreateUserRequest, Manager, OrgUnit, UserRole},
    users, ApiClient, CallOptions, ClientConfig,
};
use keelgen_runtime::StatusCode;
use serde_json::json;
use wiremock::{
    matchers::{body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ClientConfig::parse(&server.uri()).unwrap()).unwrap()
}

fn user_json(id: i64) -> serde_json::Value {
    json!({
        "id": id,
        "email": "ada@example.com",
        "displayName": "Ada",
        "role": "admin",
        "createdAt": "2024-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn get_user_returns_the_typed_model() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(42)))
        .expect(1)
        .mount(&server)
        .await;

    let args = users::GetUserArgs {
        path: users::GetUserPathParams { id: 42 },
        options: CallOptions::default(),
    };
    let envelope = users::get_user(&client_for(&server), args).await.unwrap();

    assert_eq!(envelope.status(), Some(StatusCode::OK));
    let user = envelope.into_data().expect("user");
    assert_eq!(user.id, 42);
    assert_eq!(user.display_name.as_deref(), Some("Ada"));
    assert_eq!(user.role, UserRole::Admin);
}

#[tokio::test]
async fn list_users_sends_typed_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "2"))
        .and(query_param("role", "member"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [user_json(1)],
            "pagination": { "page": 2, "limit": 20, "total": 21 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let args = users::ListUsersArgs {
        query: users::ListUsersQueryParams {
            page: Some(2),
            limit: None,
            role: Some(UserRole::Member),
        },
        options: CallOptions::default(),
    };
    let page = users::list_users(&client_for(&server), args)
        .await
        .unwrap()
        .into_data()
        .expect("page");
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.pagination.total, 21);
}

#[tokio::test]
async fn create_user_sends_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({ "email": "ada@example.com", "role": "guest" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(7)))
        .expect(1)
        .mount(&server)
        .await;

    let args = users::CreateUserArgs {
        body: CreateUserRequest {
            email: "ada@example.com".to_string(),
            display_name: None,
            role: Some(UserRole::Guest),
        },
        options: CallOptions::default(),
    };
    let envelope = users::create_user(&client_for(&server), args).await.unwrap();
    assert_eq!(envelope.status(), Some(StatusCode::CREATED));
    assert_eq!(envelope.data().map(|u| u.id), Some(7));
}

#[tokio::test]
async fn text_operation_keeps_typed_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "code": "INTERNAL_ERROR",
            "message": "database unavailable",
            "requestId": "req-9"
        })))
        .mount(&server)
        .await;

    let args = health::HealthCheckArgs {
        options: CallOptions::default(),
    };
    let envelope = health::health_check(&client_for(&server), args).await.unwrap();

    assert_eq!(envelope.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    let error = envelope.error().expect("typed error body");
    assert_eq!(error.code, ApiErrorCode::InternalError);
    assert_eq!(error.request_id, "req-9");
}

#[test]
fn recursive_models_round_trip() {
    let unit: OrgUnit = serde_json::from_value(json!({
        "name": "platform",
        "parent": { "name": "engineering" },
        "head": { "userId": 1, "unit": { "name": "platform" } }
    }))
    .unwrap();

    assert_eq!(unit.parent.as_ref().map(|p| p.name.as_str()), Some("engineering"));
    let head: &Manager = unit.head.as_deref().unwrap();
    assert_eq!(head.user_id, 1);
    assert_eq!(head.unit.as_ref().map(|u| u.name.as_str()), Some("platform"));
}

#[test]
fn endpoint_table_lists_every_operation() {
    let ids: Vec<&str> = api::ENDPOINTS.iter().map(|e| e.operation_id).collect();
    assert_eq!(ids.len(), 7);
    assert!(ids.contains(&"healthCheck"));
    assert!(ids.contains(&"getUserItem"));
    assert_eq!(api::DEFAULT_BASE_URL, "http://localhost:8080");
}
