// Endpoint handlers module

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderMap, CONTENT_LENGTH};
use hyper::{Request, StatusCode};

use super::error::{ApiError, ApiResult};
use super::types::{HealthResponse, RecommendationRequest, RecommendationResponse};
use crate::config::AppState;
use crate::http::{build_json_response, HttpResponse};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// `POST /recommend`
pub async fn handle_recommend<B>(req: Request<B>, state: &AppState) -> ApiResult<HttpResponse>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let limit = state.config.http.max_body_size;
    check_content_length(req.headers(), limit)?;

    let body = read_body(req.into_body(), limit).await?;
    let request = RecommendationRequest::from_json(&body)?;

    // Validation above guarantees non-blank fields, so an error here is a defect
    let services = state
        .rules
        .recommend(&request.industry, &request.company_size, &request.goal)
        .map_err(|e| {
            tracing::error!(company = %request.company_name, "recommendation failed: {e}");
            ApiError::Internal
        })?;

    tracing::debug!(
        company = %request.company_name,
        services = services.len(),
        "recommendation served"
    );

    Ok(build_json_response(
        StatusCode::OK,
        &RecommendationResponse {
            recommended_services: services,
        },
    ))
}

/// `GET /health`
pub fn handle_health() -> HttpResponse {
    build_json_response(StatusCode::OK, &HealthResponse { ok: true })
}

/// Reject early when `Content-Length` already exceeds the limit
fn check_content_length(headers: &HeaderMap, limit: u64) -> ApiResult<()> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(());
    };

    match value.to_str().ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(size) if size > limit => {
            tracing::warn!("Request body too large: {size} bytes (max: {limit})");
            Err(ApiError::PayloadTooLarge { limit })
        }
        Some(_) => Ok(()),
        None => {
            tracing::warn!("Invalid Content-Length value {value:?}, skipping size check");
            Ok(())
        }
    }
}

/// Collect the body, enforcing the limit for chunked uploads too
async fn read_body<B>(body: B, limit: u64) -> ApiResult<Bytes>
where
    B: Body,
    B::Error: Into<BoxError>,
{
    let max = usize::try_from(limit).unwrap_or(usize::MAX);
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::warn!("Request body exceeded {limit} bytes while reading");
            Err(ApiError::PayloadTooLarge { limit })
        }
        Err(e) => Err(ApiError::BadRequest(format!(
            "Failed to read request body: {e}"
        ))),
    }
}
