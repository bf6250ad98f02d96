use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Satellite name or catalog number, as a JSON string or number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundTrackArgs {
    pub satellite_identifier: Identifier,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub step_interval: Option<String>,
    #[serde(default)]
    pub include_footprint: bool,
    #[serde(default)]
    pub fov_deg: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteInfoArgs {
    pub satellite_identifier: Identifier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize)]
pub struct FootprintArgs {
    pub satellite_identifier: Identifier,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub fov_deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteInfo {
    pub norad_id: u32,
    pub name: String,
    pub tle_line1: String,
    pub tle_line2: String,
}
