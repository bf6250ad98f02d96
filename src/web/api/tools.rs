use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::tools::{self, ToolDescriptor};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::server::AppState;

#[utoipa::path(
    get,
    path = "/api/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Available tools with their input schemas", body = [ToolDescriptor])
    )
)]
pub async fn list_tools() -> Json<Vec<ToolDescriptor>> {
    Json(tools::tool_descriptors())
}

#[utoipa::path(
    post,
    path = "/api/tools/{name}",
    tag = "tools",
    params(
        ("name" = String, Path, description = "Tool name, e.g. generate_ground_track")
    ),
    request_body(content = serde_json::Value, description = "Tool arguments object", content_type = "application/json"),
    responses(
        (status = 200, description = "Tool result", body = serde_json::Value),
        (status = 400, description = "Invalid arguments or input", body = crate::web::api::error::ErrorResponse),
        (status = 404, description = "Unknown tool or satellite", body = crate::web::api::error::ErrorResponse),
        (status = 502, description = "Catalog unavailable or returned bad data", body = crate::web::api::error::ErrorResponse)
    )
)]
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let arguments = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("request body is not valid JSON: {}", e)))?
    };

    let result = tools::call_tool(&state.tools, &name, arguments).await?;
    Ok(Json(result))
}
