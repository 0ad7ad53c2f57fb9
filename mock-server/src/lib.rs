use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const BASE_PATH: &str = "/Platform/Destiny2";

/// Activity id that makes the carnage report route answer with HTML.
pub const MAINTENANCE_ACTIVITY_ID: &str = "0";
/// Milestone hash that makes the milestone content route answer with no body.
pub const EMPTY_MILESTONE_HASH: u32 = 0;

/// One request as the server saw it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub user_agent: Option<String>,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

pub fn app() -> Router {
    app_with_log(RequestLog::default())
}

pub fn app_with_log(log: RequestLog) -> Router {
    Router::new()
        .route(&format!("{BASE_PATH}/Manifest/"), get(manifest))
        .route(
            &format!("{BASE_PATH}/Stats/PostGameCarnageReport/{{activity_id}}/"),
            get(carnage_report),
        )
        .route(
            &format!("{BASE_PATH}/Milestones/{{milestone_hash}}/Content/"),
            get(milestone_content),
        )
        .fallback(echo)
        .with_state(log)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_log(listener: TcpListener, log: RequestLog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_log(log)).await
}

fn envelope(response: Value) -> Value {
    json!({
        "ErrorCode": 1,
        "ErrorStatus": "Success",
        "Message": "Ok",
        "Response": response,
        "ThrottleSeconds": 0,
        "MessageData": {},
    })
}

fn missing_key() -> Response {
    let body = json!({
        "ErrorCode": 2101,
        "ErrorStatus": "ApiInvalidOrExpiredKey",
        "Message": "Please use a valid key to access this resource.",
        "ThrottleSeconds": 0,
        "MessageData": {},
    });
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

/// Record the request and report whether it carried a non-empty API key.
async fn record(log: &RequestLog, uri: &Uri, headers: &HeaderMap) -> bool {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let entry = RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        api_key: header("x-api-key"),
        user_agent: header("user-agent"),
    };
    debug!(path = %entry.path, query = ?entry.query, "request");
    let authorized = entry.api_key.as_deref().is_some_and(|k| !k.is_empty());
    log.write().await.push(entry);
    authorized
}

async fn manifest(State(log): State<RequestLog>, uri: Uri, headers: HeaderMap) -> Response {
    if !record(&log, &uri, &headers).await {
        return missing_key();
    }
    Json(envelope(json!({
        "version": "x",
        "mobileAssetContentPath": "/common/destiny2_content/sqlite/asset/asset_sql_content.content",
        "mobileWorldContentPaths": {
            "en": "/common/destiny2_content/sqlite/en/world_sql_content.content"
        },
        "mobileClanBannerDatabasePath": "/common/destiny2_content/clanbanner/clanbanner_sql_content.content",
        "mobileGearCDN": {
            "Geometry": "/common/destiny2_content/geometry/platform/mobile/geometry"
        }
    })))
    .into_response()
}

async fn carnage_report(
    State(log): State<RequestLog>,
    Path(activity_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !record(&log, &uri, &headers).await {
        return missing_key();
    }
    if activity_id == MAINTENANCE_ACTIVITY_ID {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "<html><body>Bungie.net is down for maintenance.</body></html>",
        )
            .into_response();
    }
    Json(envelope(json!({
        "activityDetails": { "instanceId": activity_id, "mode": 5 },
        "entries": [],
    })))
    .into_response()
}

async fn milestone_content(
    State(log): State<RequestLog>,
    Path(milestone_hash): Path<u32>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if !record(&log, &uri, &headers).await {
        return missing_key();
    }
    if milestone_hash == EMPTY_MILESTONE_HASH {
        return StatusCode::OK.into_response();
    }
    Json(envelope(json!({ "about": format!("Milestone {milestone_hash}") }))).into_response()
}

/// Any other path: answer with the path and query the server received.
async fn echo(State(log): State<RequestLog>, uri: Uri, headers: HeaderMap) -> Response {
    if !record(&log, &uri, &headers).await {
        return missing_key();
    }
    Json(envelope(json!({
        "path": uri.path(),
        "query": uri.query(),
    })))
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_wraps_payload_as_success() {
        let value = envelope(json!({"version": "x"}));
        assert_eq!(value["ErrorCode"], 1);
        assert_eq!(value["Response"]["version"], "x");
    }

    #[test]
    fn recorded_request_roundtrips_through_json() {
        let entry = RecordedRequest {
            path: "/Platform/Destiny2/Manifest/".to_string(),
            query: None,
            api_key: Some("K".to_string()),
            user_agent: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: RecordedRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[tokio::test]
    async fn record_flags_empty_key_as_unauthorized() {
        let log = RequestLog::default();
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", "".parse().unwrap());
        let uri: Uri = "/Platform/Destiny2/Milestones/?a=1".parse().unwrap();
        assert!(!record(&log, &uri, &headers).await);
        let seen = log.read().await;
        assert_eq!(seen[0].query.as_deref(), Some("a=1"));
        assert_eq!(seen[0].api_key.as_deref(), Some(""));
    }
}
