//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: dispatches to the API, turns
//! errors into responses, and applies the headers every response carries.

use hyper::body::Body;
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::api;
use crate::config::AppState;
use crate::http::{apply_cors_headers, CorsRequest, HttpResponse};
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<HttpResponse, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| AccessLogEntry::from_request(remote_addr, &req));

    let cors = CorsRequest::from_headers(req.headers());
    let preflight = req.method() == Method::OPTIONS;

    let mut response = match api::route(req, &state).await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(status = err.status().as_u16(), "request rejected: {err}");
            err.into_response()
        }
    };

    apply_cors_headers(&mut response, &cors, &state.config.http, preflight);
    apply_server_header(&mut response, &state.config.http.server_name);

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn apply_server_header(response: &mut HttpResponse, server_name: &str) {
    match HeaderValue::from_str(server_name) {
        Ok(value) => {
            response.headers_mut().insert(SERVER, value);
        }
        Err(e) => tracing::warn!("Invalid server name {server_name:?}: {e}"),
    }
}

fn body_len(response: &HttpResponse) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(0)
}
