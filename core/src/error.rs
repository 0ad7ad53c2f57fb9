//! Error types for the Destiny 2 API client.
//!
//! # Design
//! Failures are split by where they happen in the pipeline: the connection
//! (`Transport`), the response body stream (`Stream`), or JSON decoding
//! (`Parse`). An upstream envelope with a non-success `ErrorCode` is not an
//! error here; it parses and resolves like any other body.

use std::error::Error as StdError;

/// Errors returned by the client and its transport.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, TLS failure, timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body stream failed before it completed.
    #[error("response stream error: {0}")]
    Stream(String),

    /// The accumulated body is not valid JSON (an empty body included).
    #[error("parse error: {0}")]
    Parse(String),

    /// The client configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Render an error together with its `source()` chain.
///
/// reqwest keeps the interesting part ("Connection refused") a couple of
/// levels down, so the top-level message alone is not enough.
pub(crate) fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let msg = cause.to_string();
        if !out.contains(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = cause.source();
    }
    out
}
