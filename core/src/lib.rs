//! Async client for the Destiny 2 public web API.
//!
//! # Overview
//! Every endpoint follows the same pipeline: build a request path from the
//! caller's arguments, append the query string, issue one HTTPS GET, read the
//! whole body and parse it as JSON. The parsed upstream envelope is returned
//! as-is.
//!
//! # Design
//! - [`Endpoint`] is the path-template table; [`Destiny2Client::request`] is
//!   the single dispatch function and the per-endpoint methods are thin
//!   wrappers around it.
//! - [`Destiny2Client::build_request`] is pure, so request shapes are
//!   testable without a network.
//! - [`Transport`] separates sending from parsing; [`ReqwestTransport`] is the
//!   default, tests plug in their own.
//! - No retries, caching or rate limiting. No timeout unless configured.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod json;
pub mod query;
pub mod transport;
pub mod types;

pub use client::Destiny2Client;
pub use config::{ClientConfig, OAuthConfig};
pub use endpoint::Endpoint;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use json::format_json;
pub use query::QueryParams;
pub use transport::{ReqwestTransport, Transport};
pub use types::{MembershipType, ServerResponse};
