use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::analysis::AnalysisError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<AnalysisError> for GatewayError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidCompanyName => GatewayError::InvalidRequest(err.to_string()),
            AnalysisError::SearchUnavailable { .. } => {
                GatewayError::SearchUnavailable(err.to_string())
            }
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    pub code: u16,
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::SearchUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::SearchUnavailable(_) => "search_unavailable",
            GatewayError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
            code: status.as_u16(),
        });

        (status, body).into_response()
    }
}
