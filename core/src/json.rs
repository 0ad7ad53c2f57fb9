//! Accumulates a response body and parses it as JSON.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Read every chunk of `body` in order, then parse the whole buffer.
///
/// A stream error ends the read immediately and is returned as-is; partial
/// data is never parsed.
pub async fn format_json<S>(body: S) -> Result<Value>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    let buf = collect_body(body).await?;
    parse_json(&buf)
}

/// Concatenate all chunks of `body`, stopping at the first error.
pub async fn collect_body<S>(mut body: S) -> Result<Vec<u8>>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    let mut buf = Vec::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf)
}

/// Decode `bytes` into `T`, keeping serde_json's message on failure.
pub fn parse_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use serde_json::json;

    #[tokio::test]
    async fn parses_body_split_across_chunks() {
        let resp = HttpResponse::from_chunks(200, [
            &b"{\"ErrorCode\":1,\"Resp"[..],
            &b"onse\":{\"version\":"[..],
            &b"\"x\"}}"[..],
        ]);
        let value = format_json(resp.body).await.unwrap();
        assert_eq!(value, json!({"ErrorCode": 1, "Response": {"version": "x"}}));
    }

    #[tokio::test]
    async fn empty_body_is_a_parse_error() {
        let resp = HttpResponse::from_body(200, Bytes::new());
        let err = format_json(resp.body).await.unwrap_err();
        match err {
            ApiError::Parse(msg) => assert!(msg.contains("EOF"), "unexpected message: {msg}"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_body_is_a_parse_error() {
        let resp = HttpResponse::from_body(503, "<html>Down for maintenance</html>");
        let err = format_json(resp.body).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn truncated_object_never_resolves() {
        let resp = HttpResponse::from_chunks(200, [&b"{\"Response\":{\"version\":\"x\""[..]]);
        let err = format_json(resp.body).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn stream_error_wins_over_partial_data() {
        let resp = HttpResponse::failing_after(
            200,
            [&b"{}"[..]],
            ApiError::Stream("connection reset".into()),
        );
        let err = format_json(resp.body).await.unwrap_err();
        match err {
            ApiError::Stream(msg) => assert_eq!(msg, "connection reset"),
            other => panic!("expected stream error, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_decodes_typed_values() {
        let v: Vec<u32> = parse_json(b"[1,2,3]").unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }
}
