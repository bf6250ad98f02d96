use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geodetic position: degrees, degrees, metres above the WGS-84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

/// How a sample's position was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrigin {
    /// Taken from the batch response at the matching index.
    Batch,
    /// The batch came back short; this is a copy of its last point.
    Padded,
    /// Computed by a per-instant fallback call.
    Single,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSample {
    pub time: DateTime<Utc>,
    pub position: GeoPoint,
    pub origin: SampleOrigin,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTrack {
    pub samples: Vec<TimeSample>,
}

impl GroundTrack {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Raw propagator output: satellite position in the TEME frame, km.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPoint {
    pub instant: DateTime<Utc>,
    pub position_teme_km: [f64; 3],
}

/// Batch propagation result. A one-instant batch may come back as a
/// bare point rather than a one-element series.
#[derive(Debug, Clone, PartialEq)]
pub enum OrbitTrack {
    Single(OrbitPoint),
    Series(Vec<OrbitPoint>),
}

impl OrbitTrack {
    pub fn into_points(self) -> Vec<OrbitPoint> {
        match self {
            OrbitTrack::Single(point) => vec![point],
            OrbitTrack::Series(points) => points,
        }
    }
}

/// What to do when a batch returns fewer points than requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    #[default]
    PadWithLast,
    FailOnMismatch,
}
