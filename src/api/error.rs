use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing or invalid parameter: {0}")]
    MissingParameter(&'static str),
    #[error("malformed request body: {0}")]
    BadRequest(String),
    #[error("upstream failure: {0:#}")]
    UpstreamFailure(anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::UpstreamFailure(_) => "upstream_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::MissingParameter(name) => {
                format!("{} is required and must be an integer", name)
            }
            ApiError::BadRequest(reason) => format!("Malformed request body: {}", reason),
            ApiError::UpstreamFailure(e) => {
                tracing::error!("Booking analysis failed: {:#}", e);
                "Failed to analyze booking data.".to_string()
            }
        };

        let body = ErrorBody {
            error: self.code(),
            message,
        };
        (self.status(), Json(body)).into_response()
    }
}
