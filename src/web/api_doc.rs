use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::catalog::CatalogEntry;
use crate::telemetry::{PositionLla, TelemetryMessage, TrajectoryPoint};
use crate::tools::{SatelliteInfo, ToolDescriptor};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tools::list_tools,
        super::api::tools::call_tool,
    ),
    components(
        schemas(
            ToolDescriptor,
            ErrorResponse,
            TelemetryMessage,
            PositionLla,
            TrajectoryPoint,
            SatelliteInfo,
            CatalogEntry,
        )
    ),
    info(
        title = "Sat-O-Track Tool API",
        description = "Satellite ground tracks, footprints and catalog lookups as callable tools",
        version = "0.1.0"
    ),
    tags(
        (name = "tools", description = "Tool listing and invocation")
    )
)]
pub struct ApiDoc;
