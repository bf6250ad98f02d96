use chrono::{DateTime, Utc};

use super::{
    extract_subpoint, BatchPolicy, GroundTrack, OrbitPoint, Propagator, SampleOrigin, TimeSample,
};
use crate::input::duration_from_seconds;

/// Instants `start + i * step` for every `i` with the instant still `<= end`.
pub fn sample_instants(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_seconds: f64,
) -> Vec<DateTime<Utc>> {
    let mut instants = Vec::new();
    if !(step_seconds.is_finite() && step_seconds > 0.0) {
        return instants;
    }

    for index in 0u32.. {
        let Some(offset) = duration_from_seconds(f64::from(index) * step_seconds) else {
            break;
        };
        let Some(instant) = start.checked_add_signed(offset) else {
            break;
        };
        if instant > end {
            break;
        }
        instants.push(instant);
    }
    instants
}

/// Builds a ground track over `[start, end]`.
///
/// Tries one batch propagation first and falls back to one call per
/// instant when the batch fails. Never fails itself: samples that cannot
/// be propagated or converted are logged and dropped.
pub fn generate(
    propagator: &dyn Propagator,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    step_seconds: f64,
    policy: BatchPolicy,
) -> GroundTrack {
    let instants = sample_instants(start, end, step_seconds);
    if instants.is_empty() {
        return GroundTrack::default();
    }

    let points = match batch_points(propagator, &instants, policy) {
        Some(points) => points,
        None => single_points(propagator, &instants),
    };

    let samples = points
        .into_iter()
        .filter_map(|(time, point, origin)| match extract_subpoint(&point) {
            Ok(position) => Some(TimeSample {
                time,
                position,
                origin,
            }),
            Err(e) => {
                log::warn!("dropping sample at {}: {}", time, e);
                None
            }
        })
        .collect();

    GroundTrack { samples }
}

type Placed = (DateTime<Utc>, OrbitPoint, SampleOrigin);

fn batch_points(
    propagator: &dyn Propagator,
    instants: &[DateTime<Utc>],
    policy: BatchPolicy,
) -> Option<Vec<Placed>> {
    let points = match propagator.orbit_track(instants) {
        Ok(track) => track.into_points(),
        Err(e) => {
            log::warn!("batch propagation failed, falling back to single instants: {}", e);
            return None;
        }
    };

    let last = *points.last().or_else(|| {
        log::warn!("batch propagation returned no points, falling back to single instants");
        None
    })?;

    if points.len() < instants.len() {
        match policy {
            BatchPolicy::PadWithLast => log::warn!(
                "batch returned {} of {} points, padding with the last point",
                points.len(),
                instants.len()
            ),
            BatchPolicy::FailOnMismatch => {
                log::warn!(
                    "batch returned {} of {} points, falling back to single instants",
                    points.len(),
                    instants.len()
                );
                return None;
            }
        }
    }

    Some(
        instants
            .iter()
            .enumerate()
            .map(|(index, time)| match points.get(index) {
                Some(point) => (*time, *point, SampleOrigin::Batch),
                None => (*time, last, SampleOrigin::Padded),
            })
            .collect(),
    )
}

fn single_points(propagator: &dyn Propagator, instants: &[DateTime<Utc>]) -> Vec<Placed> {
    instants
        .iter()
        .filter_map(|time| match propagator.propagate(*time) {
            Ok(point) => Some((*time, point, SampleOrigin::Single)),
            Err(e) => {
                log::warn!("propagation failed at {}: {}", time, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{iss_identity, StubPropagator};
    use crate::track::Sgp4Propagator;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 12, 21, 0, 0).unwrap()
    }

    #[test]
    fn instants_stay_within_bounds() {
        let start = t0();
        let end = start + Duration::seconds(125);
        let instants = sample_instants(start, end, 30.0);
        assert_eq!(instants.len(), 5);
        assert_eq!(instants[0], start);
        assert_eq!(instants[4], start + Duration::seconds(120));
        assert!(instants.iter().all(|t| *t >= start && *t <= end));
        assert!(instants.windows(2).all(|w| w[1] - w[0] == Duration::seconds(30)));
    }

    #[test]
    fn instants_include_exact_end() {
        let start = t0();
        let instants = sample_instants(start, start + Duration::minutes(10), 60.0);
        assert_eq!(instants.len(), 11);
        assert_eq!(instants[10], start + Duration::minutes(10));
    }

    #[test]
    fn fractional_step_does_not_drift() {
        let start = t0();
        let instants = sample_instants(start, start + Duration::seconds(10), 0.1);
        assert_eq!(instants.len(), 101);
        assert_eq!(instants[100], start + Duration::seconds(10));
    }

    #[test]
    fn full_batch_is_used() {
        let propagator = StubPropagator::new();
        let track = generate(&propagator, t0(), t0() + Duration::minutes(5), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 6);
        assert!(track.samples.iter().all(|s| s.origin == SampleOrigin::Batch));
        assert_eq!(propagator.single_calls(), 0);
    }

    #[test]
    fn short_batch_is_padded() {
        let propagator = StubPropagator::new().batch_limit(4);
        let track = generate(&propagator, t0(), t0() + Duration::minutes(5), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 6);

        let origins: Vec<_> = track.samples.iter().map(|s| s.origin).collect();
        assert_eq!(&origins[..4], &[SampleOrigin::Batch; 4]);
        assert_eq!(&origins[4..], &[SampleOrigin::Padded; 2]);
        assert_eq!(track.samples[5].position, track.samples[3].position);
        assert_eq!(track.samples[5].time, t0() + Duration::minutes(5));
    }

    #[test]
    fn short_batch_falls_back_when_strict() {
        let propagator = StubPropagator::new().batch_limit(4);
        let track = generate(
            &propagator,
            t0(),
            t0() + Duration::minutes(5),
            60.0,
            BatchPolicy::FailOnMismatch,
        );
        assert_eq!(track.len(), 6);
        assert!(track.samples.iter().all(|s| s.origin == SampleOrigin::Single));
        assert_eq!(propagator.single_calls(), 6);
    }

    #[test]
    fn failed_batch_falls_back_and_skips_bad_instants() {
        let bad = t0() + Duration::minutes(2);
        let propagator = StubPropagator::new().failing_batch().failing_at(bad);
        let track = generate(&propagator, t0(), t0() + Duration::minutes(5), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 5);
        assert!(track.samples.iter().all(|s| s.time != bad));
        assert!(track.samples.iter().all(|s| s.origin == SampleOrigin::Single));
    }

    #[test]
    fn empty_batch_falls_back() {
        let propagator = StubPropagator::new().batch_limit(0);
        let track = generate(&propagator, t0(), t0() + Duration::minutes(2), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 3);
        assert_eq!(propagator.single_calls(), 3);
    }

    #[test]
    fn total_failure_is_an_empty_track() {
        let propagator = StubPropagator::new().failing_batch().failing_everywhere();
        let track = generate(&propagator, t0(), t0() + Duration::minutes(2), 60.0, BatchPolicy::PadWithLast);
        assert!(track.is_empty());
    }

    #[test]
    fn degenerate_points_are_dropped() {
        let propagator = StubPropagator::new().degenerate_at(t0() + Duration::minutes(1));
        let track = generate(&propagator, t0(), t0() + Duration::minutes(2), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 2);
    }

    #[test]
    fn iss_track_over_one_orbit() {
        let propagator = Sgp4Propagator::new(&iss_identity()).unwrap();
        let track = generate(&propagator, t0(), t0() + Duration::minutes(92), 60.0, BatchPolicy::PadWithLast);
        assert_eq!(track.len(), 93);
        for sample in &track.samples {
            assert!(sample.position.lat_deg.abs() <= 52.0);
            assert!((-180.0..=180.0).contains(&sample.position.lon_deg));
        }
        assert!(track.samples.windows(2).all(|w| w[0].time < w[1].time));
    }
}
