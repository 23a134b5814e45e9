// API request/response types
// Requests are validated field by field so every problem is reported at once

use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{ApiError, ValidationIssue};

/// Company profile submitted to `POST /recommend`, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationRequest {
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub goal: String,
}

/// Body of a successful `POST /recommend`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationResponse {
    pub recommended_services: Vec<String>,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl RecommendationRequest {
    /// Parse and validate a JSON body.
    ///
    /// Malformed JSON is a `BadRequest`; a well-formed body with missing,
    /// null, non-string or blank fields is a `Validation` error naming each
    /// offending field.
    pub fn from_json(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {e}")))?;

        let Value::Object(mut map) = value else {
            return Err(ApiError::Validation(vec![ValidationIssue::new(
                "body",
                "must be a JSON object",
            )]));
        };

        let mut issues = Vec::new();
        let company_name = take_string(&mut map, "company_name", &mut issues);
        let industry = take_string(&mut map, "industry", &mut issues);
        let company_size = take_string(&mut map, "company_size", &mut issues);
        let goal = take_string(&mut map, "goal", &mut issues);

        match (company_name, industry, company_size, goal) {
            (Some(company_name), Some(industry), Some(company_size), Some(goal)) => Ok(Self {
                company_name,
                industry,
                company_size,
                goal,
            }),
            _ => Err(ApiError::Validation(issues)),
        }
    }
}

fn take_string(
    map: &mut Map<String, Value>,
    field: &'static str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    let message = match map.remove(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => return Some(s),
        Some(Value::String(_)) => "must not be empty",
        None | Some(Value::Null) => "field required",
        Some(_) => "must be a string",
    };
    issues.push(ValidationIssue::new(field, message));
    None
}
