//! CORS header handling
//!
//! Origins listed in `http.cors_allowed_origins` get the request origin
//! echoed back with credentials allowed; other origins get no CORS headers.

use hyper::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
    ACCESS_CONTROL_REQUEST_HEADERS, VARY,
};

use super::response::HttpResponse;
use crate::config::HttpConfig;

const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";
const DEFAULT_ALLOWED_HEADERS: &str = "Content-Type, Authorization";
const PREFLIGHT_MAX_AGE: &str = "86400";

/// CORS-relevant parts of a request, captured before the body is consumed
#[derive(Debug, Clone, Default)]
pub struct CorsRequest {
    pub origin: Option<HeaderValue>,
    pub request_headers: Option<HeaderValue>,
}

impl CorsRequest {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            origin: headers.get(hyper::header::ORIGIN).cloned(),
            request_headers: headers.get(ACCESS_CONTROL_REQUEST_HEADERS).cloned(),
        }
    }
}

/// Add CORS headers to a response when the origin is allowed
pub fn apply_cors_headers(
    response: &mut HttpResponse,
    cors: &CorsRequest,
    config: &HttpConfig,
    preflight: bool,
) {
    // Responses differ per origin as soon as an allow-list is configured,
    // including the ones that get no CORS headers
    if !config.cors_allowed_origins.is_empty() {
        response
            .headers_mut()
            .append(VARY, HeaderValue::from_static("Origin"));
    }

    let Some(origin) = &cors.origin else {
        return;
    };
    let allowed = origin
        .to_str()
        .is_ok_and(|origin| config.allows_origin(origin));
    if !allowed {
        return;
    }

    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );

    if preflight {
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            cors.request_headers
                .clone()
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS)),
        );
        headers.insert(
            ACCESS_CONTROL_MAX_AGE,
            HeaderValue::from_static(PREFLIGHT_MAX_AGE),
        );
    }
}
