use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{extract_subpoint, Propagator};
use crate::validation::normalize_longitude;

/// Geometry inputs for the circular sensor footprint.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FootprintParams {
    /// Full cone angle of the sensor, degrees.
    pub fov_deg: f64,
    pub polygon_points: usize,
    pub earth_radius_m: f64,
}

impl Default for FootprintParams {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            polygon_points: 16,
            earth_radius_m: 6_371_000.0,
        }
    }
}

impl FootprintParams {
    pub fn with_fov(self, fov_deg: Option<f64>) -> Self {
        Self {
            fov_deg: fov_deg.unwrap_or(self.fov_deg),
            ..self
        }
    }
}

/// Closed ring of `[lon, lat]` vertices in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintPolygon {
    pub ring: Vec<[f64; 2]>,
}

/// Approximates the ground footprint of a nadir-pointing sensor as a
/// small circle around the sub-satellite point.
///
/// Returns `None` when the geometry has no solution for the given inputs,
/// e.g. a field of view wide enough to see past the horizon.
pub fn footprint(
    lat_deg: f64,
    lon_deg: f64,
    alt_m: f64,
    params: &FootprintParams,
) -> Option<FootprintPolygon> {
    if !(lat_deg.is_finite() && lon_deg.is_finite() && alt_m.is_finite()) {
        return None;
    }
    if params.polygon_points < 3 || !(params.earth_radius_m > 0.0) {
        return None;
    }
    if !(params.fov_deg > 0.0 && params.fov_deg < 180.0) {
        log::debug!("footprint undefined: fov {} deg", params.fov_deg);
        return None;
    }

    let half_angle = (params.fov_deg / 2.0).to_radians();
    let radius = params.earth_radius_m;

    let angular_radius = if alt_m > 0.0 {
        let arg = (radius + alt_m) * half_angle.sin() / radius;
        if arg.abs() > 1.0 {
            log::debug!("footprint undefined: fov {} deg at {} m", params.fov_deg, alt_m);
            return None;
        }
        arg.asin() - half_angle
    } else {
        half_angle
    };

    if !angular_radius.is_finite() || angular_radius <= 0.0 {
        return None;
    }

    let lat_rad = lat_deg.to_radians();
    let cos_lat = lat_rad.cos();

    let mut ring = Vec::with_capacity(params.polygon_points + 1);
    for i in 0..params.polygon_points {
        let theta = 2.0 * std::f64::consts::PI * i as f64 / params.polygon_points as f64;
        let dlat = angular_radius * theta.cos();
        let dlon = angular_radius * theta.sin() / cos_lat;

        let vertex_lat = (lat_rad + dlat).to_degrees().clamp(-90.0, 90.0);
        let vertex_lon = normalize_longitude((lon_deg.to_radians() + dlon).to_degrees());
        if !(vertex_lat.is_finite() && vertex_lon.is_finite()) {
            return None;
        }
        ring.push([vertex_lon, vertex_lat]);
    }
    ring.push(ring[0]);

    Some(FootprintPolygon { ring })
}

/// Propagates to `instant` and computes the footprint there.
#[allow(dead_code)]
pub fn footprint_at(
    propagator: &dyn Propagator,
    instant: DateTime<Utc>,
    params: &FootprintParams,
) -> Option<FootprintPolygon> {
    let position = propagator
        .propagate(instant)
        .and_then(|point| extract_subpoint(&point));

    match position {
        Ok(geo) => footprint(geo.lat_deg, geo.lon_deg, geo.alt_m, params),
        Err(e) => {
            log::warn!("no footprint at {}: {}", instant, e);
            None
        }
    }
}
