//! HTTP request and response types shared by the client and its transports.
//!
//! # Design
//! `HttpRequest` is plain data built fresh for every call, so concurrent calls
//! on one client never share a mutable request object. `HttpResponse` carries
//! its body as a stream of chunks; the transport never looks at body bytes,
//! that is left to the JSON formatter in [`crate::json`].

use std::fmt;

use bytes::Bytes;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::error::{ApiError, Result};

pub const API_KEY_HEADER: &str = "X-API-Key";
pub const USER_AGENT_HEADER: &str = "User-Agent";

/// HTTP method for a request. Every supported endpoint is a GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// A fully resolved outbound request.
///
/// `path` is already percent-escaped where needed and includes the query
/// string. Built by `Destiny2Client::build_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub host: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Stream of body chunks in arrival order.
pub type BodyStream = BoxStream<'static, Result<Bytes>>;

/// A response whose body has not been read yet.
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: BodyStream,
}

impl HttpResponse {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: BodyStream) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// A response whose body is delivered as the given chunks.
    pub fn from_chunks<I, B>(status: u16, chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let chunks: Vec<Result<Bytes>> = chunks.into_iter().map(|c| Ok(c.into())).collect();
        Self::new(status, Vec::new(), stream::iter(chunks).boxed())
    }

    /// A response whose body is one complete buffer.
    pub fn from_body(status: u16, body: impl Into<Bytes>) -> Self {
        Self::from_chunks(status, [body.into()])
    }

    /// A response that yields `chunks` and then fails with `error`.
    pub fn failing_after<I, B>(status: u16, chunks: I, error: ApiError) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let mut items: Vec<Result<Bytes>> = chunks.into_iter().map(|c| Ok(c.into())).collect();
        items.push(Err(error));
        Self::new(status, Vec::new(), stream::iter(items).boxed())
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
