use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

pub const NORAD_ID_MIN: i64 = 1;
pub const NORAD_ID_MAX: i64 = 99_999;
pub const TLE_LINE_MIN_LEN: usize = 69;
pub const MAX_TIME_RANGE: Duration = Duration::days(30);
pub const STEP_MIN_SECONDS: f64 = 1.0;
pub const STEP_MAX_SECONDS: f64 = 3600.0;
pub const ALTITUDE_MIN_M: f64 = -100_000.0;
pub const ALTITUDE_MAX_M: f64 = 1_000_000.0;
pub const FOV_MAX_DEG: f64 = 180.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("NORAD ID must be between 1 and 99999, got {0}")]
    NoradId(i64),
    #[error("invalid TLE: {0}")]
    Tle(String),
    #[error("end time must be after start time: {start} >= {end}")]
    EmptyTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("duration {0} exceeds the maximum of 30 days")]
    TimeRangeTooLong(String),
    #[error("step interval {0}s is outside [1, 3600] seconds")]
    StepInterval(f64),
    #[error("latitude {0} is out of valid range [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is not a finite number")]
    Longitude(f64),
    #[error("altitude {0}m is outside [-100000, 1000000] meters")]
    Altitude(f64),
    #[error("field of view {0} deg must be greater than 0 and less than 180")]
    FieldOfView(f64),
}

pub fn validate_norad_id(norad_id: i64) -> Result<u32, ValidationError> {
    if !(NORAD_ID_MIN..=NORAD_ID_MAX).contains(&norad_id) {
        return Err(ValidationError::NoradId(norad_id));
    }
    Ok(norad_id as u32)
}

/// Checks the shape of a two-line element set and returns the trimmed lines.
///
/// Only the presence of the trailing checksum digit is checked here; the
/// checksum itself is verified when the lines are handed to SGP4.
pub fn validate_tle_format(line1: &str, line2: &str) -> Result<(String, String), ValidationError> {
    let line1 = line1.trim();
    let line2 = line2.trim();

    for (index, line) in [(1, line1), (2, line2)] {
        if line.len() < TLE_LINE_MIN_LEN {
            return Err(ValidationError::Tle(format!(
                "line {} too short: {} characters (minimum {})",
                index,
                line.len(),
                TLE_LINE_MIN_LEN
            )));
        }
        if !line.starts_with(&format!("{} ", index)) {
            return Err(ValidationError::Tle(format!(
                "line {} must start with '{} '",
                index, index
            )));
        }
        if !line.ends_with(|c: char| c.is_ascii_digit()) {
            return Err(ValidationError::Tle(format!(
                "line {} checksum must be a digit",
                index
            )));
        }
    }

    Ok((line1.to_string(), line2.to_string()))
}

pub fn validate_time_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    if end <= start {
        return Err(ValidationError::EmptyTimeRange { start, end });
    }

    let duration = end - start;
    if duration > MAX_TIME_RANGE {
        let shown = duration
            .to_std()
            .map(|d| humantime::format_duration(d).to_string())
            .unwrap_or_else(|_| format!("{}s", duration.num_seconds()));
        return Err(ValidationError::TimeRangeTooLong(shown));
    }

    Ok((start, end))
}

pub fn validate_step_interval(step_seconds: f64) -> Result<f64, ValidationError> {
    if !step_seconds.is_finite() || !(STEP_MIN_SECONDS..=STEP_MAX_SECONDS).contains(&step_seconds)
    {
        return Err(ValidationError::StepInterval(step_seconds));
    }
    Ok(step_seconds)
}

/// Wraps a longitude into [-180, 180]. Values already in range are returned unchanged.
pub fn normalize_longitude(lon_deg: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon_deg) {
        lon_deg
    } else {
        (lon_deg + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Latitude outside [-90, 90] is rejected, never clamped. Longitude is wrapped.
pub fn validate_coordinates(lat_deg: f64, lon_deg: f64) -> Result<(f64, f64), ValidationError> {
    if !lat_deg.is_finite() || !(-90.0..=90.0).contains(&lat_deg) {
        return Err(ValidationError::Latitude(lat_deg));
    }
    if !lon_deg.is_finite() {
        return Err(ValidationError::Longitude(lon_deg));
    }
    Ok((lat_deg, normalize_longitude(lon_deg)))
}

pub fn validate_altitude(alt_m: f64) -> Result<f64, ValidationError> {
    if !alt_m.is_finite() || !(ALTITUDE_MIN_M..=ALTITUDE_MAX_M).contains(&alt_m) {
        return Err(ValidationError::Altitude(alt_m));
    }
    Ok(alt_m)
}

/// Full cone angle of a nadir sensor, strictly between 0 and 180 degrees.
pub fn validate_fov(fov_deg: f64) -> Result<f64, ValidationError> {
    if !fov_deg.is_finite() || fov_deg <= 0.0 || fov_deg >= FOV_MAX_DEG {
        return Err(ValidationError::FieldOfView(fov_deg));
    }
    Ok(fov_deg)
}
