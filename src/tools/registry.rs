use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

use super::handlers;
use super::ToolError;
use crate::catalog::Catalog;
use crate::web::config::Config;

/// Everything a tool call needs. Cheap to clone.
#[derive(Clone)]
pub struct ToolContext {
    pub catalog: Arc<dyn Catalog>,
    pub config: Arc<Config>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    GenerateGroundTrack,
    GetSatelliteInfo,
    SearchSatellites,
    GetFootprint,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::GenerateGroundTrack,
        ToolName::GetSatelliteInfo,
        ToolName::SearchSatellites,
        ToolName::GetFootprint,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_ref() == name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GenerateGroundTrack => {
                "Generate ground track for a satellite over a specified time period with \
                 configurable time steps. When the user mentions time steps (e.g. '10 second \
                 steps', 'every 30 sec', '1 minute intervals'), pass them as step_interval, \
                 for example step_interval='10 seconds'. Time steps can be in seconds, minutes \
                 or hours; the default is '1 minute'. Returns one telemetry message per sample."
            }
            ToolName::GetSatelliteInfo => {
                "Get satellite information including TLE data from CelesTrak."
            }
            ToolName::SearchSatellites => {
                "Search for satellites by name in the CelesTrak database. Useful when you \
                 don't know the exact satellite name or NORAD ID. Returns a list of matching \
                 satellites with their NORAD IDs."
            }
            ToolName::GetFootprint => {
                "Compute the sensor footprint of a satellite at one instant, approximated as \
                 a circle around the sub-satellite point. Returns a telemetry message with \
                 the footprint polygon and the nadir point as lookpoint."
            }
        }
    }

    pub fn input_schema(&self) -> Value {
        let identifier = json!({
            "type": ["string", "integer"],
            "description": "Satellite name (e.g., 'ISS', 'Hubble') or NORAD ID"
        });
        let fov = json!({
            "type": "number",
            "description": "Sensor field of view in degrees (default: 60)"
        });

        match self {
            ToolName::GenerateGroundTrack => json!({
                "type": "object",
                "properties": {
                    "satellite_identifier": identifier,
                    "start_time": {
                        "type": "string",
                        "description": "Start time (ISO-8601, 'now' or 'in 2 hours', default: now)"
                    },
                    "duration": {
                        "type": "string",
                        "description": "Duration (e.g., '1 hour', '60 minutes', default: 1 hour)"
                    },
                    "step_interval": {
                        "type": "string",
                        "description": "Time step between points: seconds ('10 seconds', '30 sec'), \
                                        minutes ('1 minute', '5 mins') or hours ('1 hour'). \
                                        Default: '1 minute'."
                    },
                    "include_footprint": {
                        "type": "boolean",
                        "description": "Attach a sensor footprint polygon to every point",
                        "default": false
                    },
                    "fov_deg": fov
                },
                "required": ["satellite_identifier"]
            }),
            ToolName::GetSatelliteInfo => json!({
                "type": "object",
                "properties": {
                    "satellite_identifier": identifier
                },
                "required": ["satellite_identifier"]
            }),
            ToolName::SearchSatellites => json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Satellite name or partial name to search for \
                                        (e.g., 'Starlink', 'GPS', 'NOAA', 'Hubble')"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results to return (default: 10, max recommended: 50)",
                        "default": 10
                    }
                },
                "required": ["query"]
            }),
            ToolName::GetFootprint => json!({
                "type": "object",
                "properties": {
                    "satellite_identifier": identifier,
                    "time": {
                        "type": "string",
                        "description": "Instant to evaluate (ISO-8601 or 'now', default: now)"
                    },
                    "fov_deg": fov
                },
                "required": ["satellite_identifier"]
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[schema(value_type = Object)]
    pub input_schema: Value,
}

pub fn tool_descriptors() -> Vec<ToolDescriptor> {
    ToolName::ALL
        .iter()
        .map(|tool| ToolDescriptor {
            name: tool.to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        })
        .collect()
}

fn decode<T: DeserializeOwned>(tool: ToolName, arguments: Value) -> Result<T, ToolError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidArguments {
        tool: tool.to_string(),
        message: e.to_string(),
    })
}

/// Dispatches a tool call by name with JSON arguments and returns the
/// JSON result.
pub async fn call_tool(ctx: &ToolContext, name: &str, arguments: Value) -> Result<Value, ToolError> {
    let tool = ToolName::from_name(name).ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
    log::debug!("calling tool {}", tool);

    let result = match tool {
        ToolName::GenerateGroundTrack => {
            let args = decode(tool, arguments)?;
            serde_json::to_value(handlers::generate_ground_track(ctx, args).await?)?
        }
        ToolName::GetSatelliteInfo => {
            let args = decode(tool, arguments)?;
            serde_json::to_value(handlers::get_satellite_info(ctx, args).await?)?
        }
        ToolName::SearchSatellites => {
            let args = decode(tool, arguments)?;
            serde_json::to_value(handlers::search_satellites(ctx, args).await)?
        }
        ToolName::GetFootprint => {
            let args = decode(tool, arguments)?;
            serde_json::to_value(handlers::get_footprint(ctx, args).await?)?
        }
    };

    Ok(result)
}
