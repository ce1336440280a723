use serde_json::json;
use taskdash_app::AppContext;
use taskdash_domain::{ApiConfig, Config, FeedConfig, TaskDashError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            base_backoff_ms: 1,
            ..ApiConfig::default()
        },
        feed: FeedConfig { max_entries: 2, fetch_limit: 10 },
        ..Config::default()
    }
}

#[tokio::test]
async fn snapshot_uses_configured_feed_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "A", "createdAt": "2024-01-01T00:00:00Z" },
            { "id": 2, "name": "B", "createdAt": "2024-01-02T00:00:00Z" },
            { "id": 3, "name": "C", "createdAt": "2024-01-03T00:00:00Z" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
        .mount(&server)
        .await;

    let ctx = AppContext::new(config_for(&server)).unwrap();
    let snapshot = ctx.snapshot().await.unwrap();

    let targets: Vec<&str> = snapshot.activities.iter().map(|e| e.target.as_str()).collect();
    assert_eq!(targets, vec!["C", "B"]);
    assert!(snapshot.activities.iter().all(|e| e.user.is_system()));
    assert_eq!(snapshot.stats.total_projects, 3);
}

#[tokio::test]
async fn poller_is_built_stopped() {
    let server = MockServer::start().await;
    let ctx = AppContext::new(config_for(&server)).unwrap();

    let poller = ctx.poller();

    assert!(!poller.is_running().await);
    assert!(poller.latest().is_none());
}

#[test]
fn invalid_config_is_rejected() {
    let config = Config {
        api: ApiConfig { base_url: "not a url".into(), ..ApiConfig::default() },
        ..Config::default()
    };
    assert!(matches!(AppContext::new(config), Err(TaskDashError::Config(_))));

    let zero_cap =
        Config { feed: FeedConfig { max_entries: 0, fetch_limit: 20 }, ..Config::default() };
    assert!(matches!(AppContext::new(zero_cap), Err(TaskDashError::Config(_))));
}
