use chrono::{DateTime, Utc};

use super::registry::ToolContext;
use super::types::{FootprintArgs, GroundTrackArgs, SatelliteInfo, SatelliteInfoArgs, SearchArgs};
use super::ToolError;
use crate::catalog::{self, CatalogEntry, SatelliteIdentity};
use crate::input::{duration_from_seconds, parse_duration, parse_time};
use crate::telemetry::{format_message, format_response, MessageExtras, TelemetryMessage};
use crate::track::{
    extract_subpoint, footprint, generate, BatchPolicy, FootprintParams, GeoPoint, Propagator,
    Sgp4Propagator,
};
use crate::validation::{
    validate_altitude, validate_fov, validate_step_interval, validate_time_range, ValidationError,
};
use crate::web::config::GroundTrackSettings;

const FOOTPRINT_UNAVAILABLE_FLAG: &str = "footprint_unavailable";

/// A validated sampling window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step_seconds: f64,
}

/// Parses and validates the raw window arguments, filling in defaults.
pub fn track_window(
    start_time: Option<&str>,
    duration: Option<&str>,
    step_interval: Option<&str>,
    settings: &GroundTrackSettings,
) -> Result<TrackWindow, ToolError> {
    let start = start_time.map(parse_time).transpose()?.unwrap_or_else(Utc::now);
    let duration_secs = duration
        .map(parse_duration)
        .transpose()?
        .unwrap_or(settings.default_duration_secs);
    let step_seconds = step_interval
        .map(parse_duration)
        .transpose()?
        .unwrap_or(settings.default_step_secs);

    let end = duration_from_seconds(duration_secs)
        .and_then(|duration| start.checked_add_signed(duration))
        .ok_or_else(|| ValidationError::TimeRangeTooLong(format!("{}s", duration_secs)))?;

    let (start, end) = validate_time_range(start, end)?;
    let step_seconds = validate_step_interval(step_seconds)?;

    Ok(TrackWindow {
        start,
        end,
        step_seconds,
    })
}

/// Generates the track and formats it. With `footprint_params` set, every sample
/// gets a footprint computed at its own position.
pub fn build_track_messages(
    identity: &SatelliteIdentity,
    propagator: &dyn Propagator,
    window: &TrackWindow,
    policy: BatchPolicy,
    footprint_params: Option<&FootprintParams>,
) -> Vec<TelemetryMessage> {
    let track = generate(
        propagator,
        window.start,
        window.end,
        window.step_seconds,
        policy,
    );
    if track.is_empty() {
        log::warn!(
            "no usable samples for {} ({}) between {} and {}",
            identity.name,
            identity.norad_id,
            window.start,
            window.end
        );
    } else {
        log::info!(
            "generated {} samples for {} ({})",
            track.len(),
            identity.name,
            identity.norad_id
        );
    }

    let footprints = footprint_params.map(|params| {
        track
            .samples
            .iter()
            .map(|s| footprint(s.position.lat_deg, s.position.lon_deg, s.position.alt_m, params))
            .collect::<Vec<_>>()
    });

    format_response(
        &identity.norad_id.to_string(),
        &track,
        footprints.as_deref(),
    )
}

pub async fn generate_ground_track(
    ctx: &ToolContext,
    args: GroundTrackArgs,
) -> Result<Vec<TelemetryMessage>, ToolError> {
    let window = track_window(
        args.start_time.as_deref(),
        args.duration.as_deref(),
        args.step_interval.as_deref(),
        &ctx.config.ground_track,
    )?;
    let sensor = args
        .include_footprint
        .then(|| footprint_params(&ctx.config.footprint, args.fov_deg))
        .transpose()?;

    let identity =
        catalog::resolve(ctx.catalog.as_ref(), &args.satellite_identifier.to_string()).await?;
    let propagator = Sgp4Propagator::new(&identity)?;

    Ok(build_track_messages(
        &identity,
        &propagator,
        &window,
        ctx.config.ground_track.batch_policy,
        sensor.as_ref(),
    ))
}

pub async fn get_satellite_info(
    ctx: &ToolContext,
    args: SatelliteInfoArgs,
) -> Result<SatelliteInfo, ToolError> {
    let identity =
        catalog::resolve(ctx.catalog.as_ref(), &args.satellite_identifier.to_string()).await?;

    Ok(SatelliteInfo {
        norad_id: identity.norad_id,
        name: identity.name,
        tle_line1: identity.elements.line1().to_string(),
        tle_line2: identity.elements.line2().to_string(),
    })
}

pub async fn search_satellites(ctx: &ToolContext, args: SearchArgs) -> Vec<CatalogEntry> {
    catalog::search(ctx.catalog.as_ref(), args.query.trim(), args.limit).await
}

/// Footprint at a single instant, with the nadir point as the lookpoint.
pub async fn get_footprint(
    ctx: &ToolContext,
    args: FootprintArgs,
) -> Result<TelemetryMessage, ToolError> {
    let time = args
        .time
        .as_deref()
        .map(parse_time)
        .transpose()?
        .unwrap_or_else(Utc::now);
    let params = footprint_params(&ctx.config.footprint, args.fov_deg)?;

    let identity =
        catalog::resolve(ctx.catalog.as_ref(), &args.satellite_identifier.to_string()).await?;
    let propagator = Sgp4Propagator::new(&identity)?;

    footprint_message(&identity, &propagator, time, &params)
}

/// Applies a per-call field of view over the configured one and checks the result.
fn footprint_params(
    configured: &FootprintParams,
    fov_deg: Option<f64>,
) -> Result<FootprintParams, ToolError> {
    let params = configured.with_fov(fov_deg);
    validate_fov(params.fov_deg)?;
    Ok(params)
}

pub(crate) fn footprint_message(
    identity: &SatelliteIdentity,
    propagator: &dyn Propagator,
    time: DateTime<Utc>,
    params: &FootprintParams,
) -> Result<TelemetryMessage, ToolError> {
    let position = extract_subpoint(&propagator.propagate(time)?)?;
    let lookpoint = GeoPoint {
        alt_m: validate_altitude(0.0)?,
        ..position
    };

    let polygon = footprint(position.lat_deg, position.lon_deg, position.alt_m, params);
    let unavailable = [FOOTPRINT_UNAVAILABLE_FLAG.to_string()];

    let extras = MessageExtras {
        lookpoint: Some(&lookpoint),
        footprint: polygon.as_ref().map(|p| p.ring.as_slice()),
        state_flags: if polygon.is_some() { &[] } else { &unavailable },
        ..MessageExtras::default()
    };

    Ok(format_message(
        &identity.norad_id.to_string(),
        time,
        &position,
        extras,
    )?)
}
