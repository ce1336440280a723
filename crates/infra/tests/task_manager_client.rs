//! Integration tests for the task manager client against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use taskdash_core::{DashboardService, DashboardSource};
use taskdash_domain::{ApiConfig, FeedConfig, TaskDashError, TaskFilters};
use taskdash_infra::{ApiError, HttpClient, StaticTokenProvider, TaskManagerClient};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TaskManagerClient {
    let http = HttpClient::builder()
        .base_backoff(Duration::from_millis(5))
        .max_attempts(3)
        .build()
        .expect("http client");
    TaskManagerClient::with_http_client(http, &format!("{}/api", server.uri())).expect("client")
}

async fn mount_dashboard(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Website", "ownerId": 7, "createdAt": "2024-01-01T00:00:00" },
            { "id": 2, "name": "Mobile app", "ownerId": 8, "createdAt": "2024-01-03T00:00:00" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": 5,
                    "title": "Fix bug",
                    "status": "COMPLETED",
                    "assigneeId": 8,
                    "creatorId": 7,
                    "createdAt": "2024-01-02T00:00:00",
                    "updatedAt": "2024-01-04T00:00:00"
                },
                {
                    "id": 6,
                    "title": "Write tests",
                    "status": "PENDING",
                    "creatorId": 7,
                    "createdAt": "2024-01-02T12:00:00",
                    "updatedAt": "2024-01-02T12:00:00"
                }
            ],
            "total": 2,
            "page": 1,
            "limit": 20,
            "totalPages": 1
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "username": "alice", "email": "alice@example.com" },
            { "id": 8, "username": "bob", "email": "bob@example.com" }
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn feed_requests_newest_slice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .and(query_param("page", "1"))
        .and(query_param("size", "25"))
        .and(query_param("sort", "createdAt,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(query_param("size", "25"))
        .and(query_param("sort", "updatedAt,desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.fetch_projects(25).await.unwrap().is_empty());
    assert!(client.fetch_tasks(25).await.unwrap().is_empty());
}

#[tokio::test]
async fn task_filters_become_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(query_param("page", "2"))
        .and(query_param("size", "10"))
        .and(query_param("status", "PENDING,IN_PROGRESS"))
        .and(query_param("assigneeId", "4"))
        .and(query_param("search", "login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "id": 11, "title": "Login page", "status": "PENDING" }],
            "total": 11, "page": 2, "limit": 10, "totalPages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let filters = TaskFilters {
        status: vec!["PENDING".into(), "IN_PROGRESS".into()],
        assignee_id: vec!["4".into(), "9".into()],
        search: Some("login".into()),
        ..TaskFilters::default()
    };

    let listing = client_for(&server).list_tasks(&filters, 2, 10).await.unwrap();

    assert!(listing.is_paginated());
    assert_eq!(listing.total(), 11);
    assert_eq!(listing.items()[0].title.as_deref(), Some("Login page"));
}

#[tokio::test]
async fn total_without_data_is_treated_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [], "total": 42, "page": 1, "limit": 20, "totalPages": 3
        })))
        .mount(&server)
        .await;

    let listing = client_for(&server).fetch_tasks(20).await.unwrap();

    assert!(listing.is_empty());
    assert!(!listing.is_paginated());
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("authorization", "Bearer s3cret"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "username": "root" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_auth(Arc::new(StaticTokenProvider::new("s3cret")));
    let users = client.list_users().await.unwrap();

    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn config_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("authorization", "Bearer from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ApiConfig {
        base_url: format!("{}/api", server.uri()),
        access_token: Some("from-config".into()),
        ..ApiConfig::default()
    };

    assert!(TaskManagerClient::new(&config).unwrap().list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.list_projects(1, 20).await.unwrap_err();
    assert!(matches!(err, ApiError::Auth(ref msg) if msg.contains("token expired")), "{err:?}");

    let domain = client.fetch_projects(20).await.unwrap_err();
    assert!(matches!(domain, TaskDashError::Auth(_)));
}

#[tokio::test]
async fn persistent_server_error_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server).list_users().await.unwrap_err();

    assert!(matches!(err, ApiError::Server(_)), "{err:?}");
    assert!(err.should_retry());
}

#[tokio::test]
async fn unexpected_shape_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(matches!(client.list_projects(1, 20).await, Err(ApiError::Decode(_))));
    assert!(matches!(client.list_users().await, Err(ApiError::Decode(_))));
}

#[tokio::test]
async fn empty_body_reads_as_no_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert!(client_for(&server).list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn dashboard_snapshot_over_http() {
    let server = MockServer::start().await;
    mount_dashboard(&server).await;

    let service = DashboardService::new(Arc::new(client_for(&server)), FeedConfig::default());
    let snapshot = service.snapshot().await.unwrap();

    let ids: Vec<&str> = snapshot.activities.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["task-5", "project-2", "task-6", "project-1"]);

    let completed = &snapshot.activities[0];
    assert_eq!(completed.action, "task completed");
    assert_eq!(completed.user.username, "bob");

    let created = &snapshot.activities[2];
    assert_eq!(created.action, "task created");
    assert_eq!(created.user.username, "alice");

    assert_eq!(snapshot.stats.total_projects, 2);
    assert_eq!(snapshot.stats.total_tasks, 2);
    assert_eq!(snapshot.stats.completed_tasks, 1);
    assert_eq!(snapshot.stats.pending_tasks, 1);
}
