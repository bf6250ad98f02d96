use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::tools::ToolError;
use crate::track::PropagationError;

pub enum ApiError {
    BadRequest(String),
    Tool(ToolError),
}

impl From<ToolError> for ApiError {
    fn from(e: ToolError) -> Self {
        ApiError::Tool(e)
    }
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            ApiError::Tool(e) => match e {
                ToolError::UnknownTool(_) => (StatusCode::NOT_FOUND, "unknown_tool"),
                ToolError::InvalidArguments { .. } => (StatusCode::BAD_REQUEST, "invalid_arguments"),
                ToolError::Input(_) => (StatusCode::BAD_REQUEST, "invalid_input"),
                ToolError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
                ToolError::Catalog(CatalogError::NotFound(_)) => {
                    (StatusCode::NOT_FOUND, "satellite_not_found")
                }
                ToolError::Catalog(CatalogError::Validation(_)) => {
                    (StatusCode::BAD_REQUEST, "validation_failed")
                }
                ToolError::Catalog(_)
                | ToolError::Propagation(
                    PropagationError::InvalidTle(_) | PropagationError::Elements(_),
                ) => (StatusCode::BAD_GATEWAY, "catalog_error"),
                ToolError::Propagation(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "propagation_failed")
                }
                ToolError::Telemetry(_) | ToolError::Encode(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Tool(e) => e.to_string(),
        };

        if status.is_server_error() {
            log::warn!("{}: {}", code, message);
        }

        (status, Json(ErrorResponse::with_message(code, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
