use chrono::{DateTime, SecondsFormat, Utc};
use geojson::{Feature, Geometry, JsonObject, Value};

use super::{MessageExtras, PositionLla, TelemetryError, TelemetryMessage, TrajectoryPoint};
use crate::track::{FootprintPolygon, GeoPoint, GroundTrack, SampleOrigin};
use crate::validation::{validate_coordinates, ValidationError};

/// Marks samples whose position was copied from the last point of a
/// short batch.
pub const BATCH_PADDED_FLAG: &str = "batch_padded";

pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Re-validates coordinates right before they are emitted.
pub fn format_position(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Result<PositionLla, ValidationError> {
    let (lat_deg, lon_deg) = validate_coordinates(lat_deg, lon_deg)?;
    Ok(PositionLla {
        lat_deg,
        lon_deg,
        alt_m,
    })
}

fn format_geo(point: &GeoPoint) -> Result<PositionLla, ValidationError> {
    format_position(point.lat_deg, point.lon_deg, point.alt_m)
}

/// GeoJSON polygon feature from a `[lon, lat]` ring. Vertices that fail
/// validation are dropped; fewer than three survivors yields `None`.
pub fn format_footprint(ring: &[[f64; 2]]) -> Option<Feature> {
    if ring.len() < 3 {
        return None;
    }

    let mut positions: Vec<Vec<f64>> = ring
        .iter()
        .filter_map(|[lon, lat]| match validate_coordinates(*lat, *lon) {
            Ok((lat, lon)) => Some(vec![lon, lat]),
            Err(e) => {
                log::debug!("dropping footprint vertex: {}", e);
                None
            }
        })
        .collect();

    if positions.len() < 3 {
        return None;
    }
    if positions.first() != positions.last() {
        positions.push(positions[0].clone());
    }

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![positions]))),
        id: None,
        properties: Some(JsonObject::new()),
        foreign_members: None,
    })
}

pub fn format_trajectory(samples: &[(DateTime<Utc>, GeoPoint)]) -> Vec<TrajectoryPoint> {
    samples
        .iter()
        .filter_map(|(time, point)| match format_geo(point) {
            Ok(position_lla) => Some(TrajectoryPoint {
                time: format_timestamp(*time),
                position_lla,
            }),
            Err(e) => {
                log::warn!("skipping trajectory point at {}: {}", time, e);
                None
            }
        })
        .collect()
}

pub fn format_message(
    id: &str,
    time: DateTime<Utc>,
    position: &GeoPoint,
    extras: MessageExtras<'_>,
) -> Result<TelemetryMessage, TelemetryError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(TelemetryError::EmptyId);
    }

    let lookpoint_lla = extras.lookpoint.map(format_geo).transpose()?;
    let footprint_geojson = extras.footprint.and_then(format_footprint);
    let trajectory_batches = extras
        .trajectory
        .map(format_trajectory)
        .filter(|points| !points.is_empty());
    let state_flags = Some(extras.state_flags.to_vec()).filter(|flags| !flags.is_empty());

    Ok(TelemetryMessage {
        id: id.to_string(),
        time: format_timestamp(time),
        position_lla: format_geo(position)?,
        lookpoint_lla,
        footprint_geojson,
        state_flags,
        trajectory_batches,
    })
}

/// One message per sample. `footprints` pairs with samples by index;
/// samples that fail formatting are skipped with a warning.
pub fn format_response(
    id: &str,
    track: &GroundTrack,
    footprints: Option<&[Option<FootprintPolygon>]>,
) -> Vec<TelemetryMessage> {
    let padded = [BATCH_PADDED_FLAG.to_string()];

    track
        .samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let footprint = footprints
                .and_then(|all| all.get(index))
                .and_then(Option::as_ref)
                .map(|polygon| polygon.ring.as_slice());
            let state_flags: &[String] = match sample.origin {
                SampleOrigin::Padded => &padded,
                SampleOrigin::Batch | SampleOrigin::Single => &[],
            };

            let extras = MessageExtras {
                footprint,
                state_flags,
                ..MessageExtras::default()
            };
            match format_message(id, sample.time, &sample.position, extras) {
                Ok(message) => Some(message),
                Err(e) => {
                    log::warn!("skipping telemetry point at {}: {}", sample.time, e);
                    None
                }
            }
        })
        .collect()
}
