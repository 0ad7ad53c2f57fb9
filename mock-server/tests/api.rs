use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_log, RequestLog};
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn keyed_get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header("X-API-Key", "test-key")
        .header("User-Agent", "api-tests/1.0")
        .body(String::new())
        .unwrap()
}

// --- manifest ---

#[tokio::test]
async fn manifest_returns_success_envelope() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Manifest/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["ErrorCode"], 1);
    assert_eq!(body["Response"]["version"], "x");
    assert!(body["Response"]["mobileWorldContentPaths"]["en"].is_string());
}

#[tokio::test]
async fn missing_key_returns_upstream_error_envelope() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/Platform/Destiny2/Manifest/")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["ErrorCode"], 2101);
    assert!(body.get("Response").is_none());
}

// --- carnage report ---

#[tokio::test]
async fn carnage_report_echoes_activity_id() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Stats/PostGameCarnageReport/12345/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["Response"]["activityDetails"]["instanceId"], "12345");
}

#[tokio::test]
async fn maintenance_activity_returns_html() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Stats/PostGameCarnageReport/0/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_bytes(resp).await;
    assert!(body.starts_with(b"<html>"));
}

// --- milestones ---

#[tokio::test]
async fn empty_milestone_returns_empty_body() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Milestones/0/Content/"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn milestone_content_is_json() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Milestones/3603098564/Content/"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["Response"]["about"], "Milestone 3603098564");
}

// --- echo ---

#[tokio::test]
async fn unknown_paths_echo_path_and_query() {
    let resp = app()
        .oneshot(keyed_get(
            "/Platform/Destiny2/1/Profile/4611686018452936098/?components=100,200",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(
        body["Response"]["path"],
        "/Platform/Destiny2/1/Profile/4611686018452936098/"
    );
    assert_eq!(body["Response"]["query"], "components=100,200");
}

#[tokio::test]
async fn echo_without_query_reports_null() {
    let resp = app()
        .oneshot(keyed_get("/Platform/Destiny2/Milestones/"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert!(body["Response"]["query"].is_null());
}

// --- request log ---

#[tokio::test]
async fn log_records_every_request_in_order() {
    use tower::Service;

    let log = RequestLog::default();
    let mut app = app_with_log(log.clone()).into_service();

    for uri in [
        "/Platform/Destiny2/Manifest/",
        "/Platform/Destiny2/Stats/Definition/",
        "/Platform/Destiny2/SearchDestinyPlayer/-1/Cayde%206/",
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(keyed_get(uri))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let seen = log.read().await;
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0].path, "/Platform/Destiny2/Manifest/");
    assert_eq!(seen[1].path, "/Platform/Destiny2/Stats/Definition/");
    assert_eq!(seen[2].path, "/Platform/Destiny2/SearchDestinyPlayer/-1/Cayde%206/");
    assert_eq!(seen[2].api_key.as_deref(), Some("test-key"));
    assert_eq!(seen[2].user_agent.as_deref(), Some("api-tests/1.0"));
}
