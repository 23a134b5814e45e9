// API module entry
// Recommendation endpoints: route table, request types and error mapping

mod error;
mod handlers;
mod types;

use hyper::body::Body;
use hyper::{Method, Request};

use crate::config::AppState;
use crate::http::{build_options_response, HttpResponse};

pub use error::{ApiError, ApiResult};

/// `Allow` value for paths without a dedicated endpoint
const ALLOW_ANY: &str = "GET, HEAD, POST, OPTIONS";

/// Endpoints served by this API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Recommend,
    Health,
}

impl Endpoint {
    fn from_path(path: &str) -> Option<Self> {
        match path {
            "/recommend" => Some(Self::Recommend),
            "/health" => Some(Self::Health),
            _ => None,
        }
    }

    /// Value of the `Allow` header for this endpoint
    const fn allow(self) -> &'static str {
        match self {
            Self::Recommend => "POST, OPTIONS",
            Self::Health => "GET, HEAD, OPTIONS",
        }
    }
}

/// API route handler
///
/// Dispatches to handler functions based on request path and method
pub async fn route<B>(req: Request<B>, state: &AppState) -> ApiResult<HttpResponse>
where
    B: Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let endpoint = Endpoint::from_path(req.uri().path());

    // Preflights are answered for any path
    if req.method() == Method::OPTIONS {
        return Ok(build_options_response(
            endpoint.map_or(ALLOW_ANY, Endpoint::allow),
        ));
    }

    let Some(endpoint) = endpoint else {
        return Err(ApiError::NotFound);
    };

    let method = req.method().clone();
    match (method, endpoint) {
        (Method::POST, Endpoint::Recommend) => handlers::handle_recommend(req, state).await,
        (Method::GET | Method::HEAD, Endpoint::Health) => Ok(handlers::handle_health()),
        _ => Err(ApiError::MethodNotAllowed {
            allow: endpoint.allow(),
        }),
    }
}
