//! Success and failure bodies shared by the API handlers.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::problem::ProblemDetails;

/// JSON payload with a `content_type` member next to its own fields.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub content_type: &'static str,
}

impl<T> ServiceResponse<T> {
    /// Wrap `data` as `application/json`.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json",
        }
    }
}

/// Handler outcome: a 200 payload or a problem response.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(ServiceResponse<T>),
    Problem(ProblemDetails),
}

impl<T> ApiResponse<T> {
    /// 200 with `data`.
    pub fn ok(data: T) -> Self {
        ApiResponse::Success(ServiceResponse::new(data))
    }
}

impl<T> From<ProblemDetails> for ApiResponse<T> {
    fn from(problem: ProblemDetails) -> Self {
        ApiResponse::Problem(problem)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResponse::Success(body) => Json(body).into_response(),
            ApiResponse::Problem(problem) => problem.into_response(),
        }
    }
}
