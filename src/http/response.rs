//! HTTP response building module
//!
//! Builders for the JSON responses the service returns. None of them panic:
//! a failed build is logged and degrades to a bare response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

pub type HttpResponse = Response<Full<Bytes>>;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Build JSON response
pub fn build_json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    match serde_json::to_vec(body) {
        Ok(json) => build_raw_json(status, Bytes::from(json)),
        Err(e) => {
            tracing::error!("Failed to serialize response: {e}");
            build_raw_json(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Internal server error"}"#),
            )
        }
    }
}

/// Build `{"error": message}` response
pub fn build_error_response(status: StatusCode, message: &str) -> HttpResponse {
    build_json_response(status, &serde_json::json!({ "error": message }))
}

/// Build 404 Not Found response
pub fn build_404_response() -> HttpResponse {
    build_error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Build 405 Method Not Allowed response
pub fn build_405_response(allow: &'static str) -> HttpResponse {
    let mut response = build_error_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    response
        .headers_mut()
        .insert(ALLOW, hyper::header::HeaderValue::from_static(allow));
    response
}

/// Build 413 Payload Too Large response
pub fn build_413_response(limit: u64) -> HttpResponse {
    build_error_response(
        StatusCode::PAYLOAD_TOO_LARGE,
        &format!("Request body exceeds {limit} bytes"),
    )
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(allow: &'static str) -> HttpResponse {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ALLOW, allow)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_raw_json(status: StatusCode, body: Bytes) -> HttpResponse {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(Full::new(body.clone()))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(body))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    tracing::error!("Failed to build {status} response: {error}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_json_response() {
        let response = build_json_response(StatusCode::OK, &serde_json::json!({ "ok": true }));
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(body_json(response).await, serde_json::json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = build_404_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not Found");
    }

    #[test]
    fn test_405_has_allow() {
        let response = build_405_response("POST, OPTIONS");
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[ALLOW], "POST, OPTIONS");
    }

    #[tokio::test]
    async fn test_413_mentions_limit() {
        let response = build_413_response(1024);
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("1024"));
    }

    #[test]
    fn test_options_response() {
        let response = build_options_response("GET, HEAD, OPTIONS");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[ALLOW], "GET, HEAD, OPTIONS");
    }
}
