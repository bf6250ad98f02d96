use serde::Serialize;
use utoipa::ToSchema;

use crate::track::GeoPoint;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct PositionLla {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrajectoryPoint {
    /// RFC 3339, UTC, `Z` suffix.
    pub time: String,
    pub position_lla: PositionLla,
}

/// One output record per propagated sample.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TelemetryMessage {
    pub id: String,
    pub time: String,
    pub position_lla: PositionLla,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookpoint_lla: Option<PositionLla>,
    /// GeoJSON `Feature` with a `Polygon` geometry and empty properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub footprint_geojson: Option<geojson::Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_flags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trajectory_batches: Option<Vec<TrajectoryPoint>>,
}

/// Optional parts of a [`TelemetryMessage`]. Anything left at its default
/// is omitted from the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageExtras<'a> {
    pub lookpoint: Option<&'a GeoPoint>,
    /// `[lon, lat]` ring.
    pub footprint: Option<&'a [[f64; 2]]>,
    pub trajectory: Option<&'a [(chrono::DateTime<chrono::Utc>, GeoPoint)]>,
    pub state_flags: &'a [String],
}
