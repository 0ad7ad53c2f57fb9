//! Issuing requests over the network.
//!
//! # Design
//! `Transport` is the seam between building a request and parsing its body.
//! `ReqwestTransport` is the real one; tests substitute an in-memory
//! implementation. A transport performs exactly one attempt per call and
//! never interprets the status code or the body.

use async_trait::async_trait;
use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{describe, ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return once the response head has arrived.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse>;
}

/// HTTPS transport backed by a shared `reqwest::Client`.
///
/// The inner client pools connections; clones share the pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    origin: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = client_builder(config)
            .build()
            .map_err(|e| ApiError::Transport(describe(&e)))?;
        Ok(Self { http, origin: None })
    }

    /// Send every request to `origin` (e.g. `http://127.0.0.1:3000`) instead
    /// of `https://{request.host}`. System proxies are bypassed.
    pub fn with_origin(config: &ClientConfig, origin: &str) -> Result<Self> {
        let http = client_builder(config)
            .no_proxy()
            .build()
            .map_err(|e| ApiError::Transport(describe(&e)))?;
        Ok(Self {
            http,
            origin: Some(origin.trim_end_matches('/').to_string()),
        })
    }

    fn url(&self, request: &HttpRequest) -> String {
        match &self.origin {
            Some(origin) => format!("{origin}{}", request.path),
            None => format!("https://{}{}", request.host, request.path),
        }
    }
}

fn client_builder(config: &ClientConfig) -> reqwest::ClientBuilder {
    let builder = reqwest::Client::builder();
    match config.timeout() {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let url = self.url(request);
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            let msg = describe(&e);
            warn!(url = %url, error = %msg, "request failed");
            ApiError::Transport(msg)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| ApiError::Stream(describe(&e))))
            .boxed();

        let response = HttpResponse::new(status, headers, body);
        debug!(
            url = %url,
            status,
            content_type = response.header("content-type").unwrap_or("-"),
            "response received"
        );
        Ok(response)
    }
}
