use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::{GeoPoint, OrbitPoint, OrbitTrack, PropagationError, WGS84_A_KM, WGS84_F};
use crate::catalog::SatelliteIdentity;

/// Orbit propagation seam used by the ground-track orchestrator.
pub trait Propagator {
    /// Propagates every instant in one call. Points align with `instants`
    /// by index, but an implementation may return fewer than requested.
    fn orbit_track(&self, instants: &[DateTime<Utc>]) -> Result<OrbitTrack, PropagationError>;

    fn propagate(&self, instant: DateTime<Utc>) -> Result<OrbitPoint, PropagationError>;
}

pub struct Sgp4Propagator {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Propagator {
    pub fn new(identity: &SatelliteIdentity) -> Result<Self, PropagationError> {
        let elements = Elements::from_tle(
            Some(identity.name.clone()),
            identity.elements.line1().as_bytes(),
            identity.elements.line2().as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }
}

impl Propagator for Sgp4Propagator {
    fn orbit_track(&self, instants: &[DateTime<Utc>]) -> Result<OrbitTrack, PropagationError> {
        if let [instant] = instants {
            return self.propagate(*instant).map(OrbitTrack::Single);
        }

        let points = instants
            .iter()
            .map(|instant| self.propagate(*instant))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrbitTrack::Series(points))
    }

    fn propagate(&self, instant: DateTime<Utc>) -> Result<OrbitPoint, PropagationError> {
        let failed = |message: String| PropagationError::Propagation { instant, message };

        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&instant.naive_utc())
            .map_err(|e| failed(e.to_string()))?;
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| failed(e.to_string()))?;

        Ok(OrbitPoint {
            instant,
            position_teme_km: prediction.position,
        })
    }
}

/// Sub-satellite point of a TEME position. Longitude comes out in
/// [-180, 180]; altitude is in metres.
pub fn extract_subpoint(point: &OrbitPoint) -> Result<GeoPoint, PropagationError> {
    let reject = |reason: &str| PropagationError::Subpoint {
        instant: point.instant,
        reason: reason.to_string(),
    };

    let [x, y, z] = point.position_teme_km;
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(reject("position is not finite"));
    }
    if x == 0.0 && y == 0.0 && z == 0.0 {
        return Err(reject("position is at the Earth's centre"));
    }

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&point.instant.naive_utc()));
    let ecef = teme_to_ecef_position(point.position_teme_km, sidereal);
    let (lat_rad, lon_rad, alt_km) = ecef_to_geodetic(ecef);

    if !(lat_rad.is_finite() && lon_rad.is_finite() && alt_km.is_finite()) {
        return Err(reject("geodetic conversion did not converge"));
    }

    Ok(GeoPoint {
        lat_deg: lat_rad.to_degrees(),
        lon_deg: lon_rad.to_degrees(),
        alt_m: alt_km * 1000.0,
    })
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Bowring's closed-form ECEF to WGS-84 geodetic conversion.
/// Returns (latitude rad, longitude rad, height km).
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> (f64, f64, f64) {
    let a = WGS84_A_KM;
    let b = a * (1.0 - WGS84_F);
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let ep2 = (a * a - b * b) / (b * b);

    let [x, y, z] = ecef;
    let p = x.hypot(y);
    let lon = y.atan2(x);

    let theta = (z * a).atan2(p * b);
    let (sin_theta, cos_theta) = theta.sin_cos();
    let lat = (z + ep2 * b * sin_theta.powi(3)).atan2(p - e2 * a * cos_theta.powi(3));

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let alt = if cos_lat.abs() > 1e-10 {
        p / cos_lat - n
    } else {
        z.abs() - b
    };

    (lat, lon, alt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::iss_identity;

    fn at(text: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(text).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn geodetic_on_axes() {
        let (lat, lon, alt) = ecef_to_geodetic([WGS84_A_KM + 400.0, 0.0, 0.0]);
        assert!(lat.abs() < 1e-12);
        assert!(lon.abs() < 1e-12);
        assert!((alt - 400.0).abs() < 1e-6);

        let (lat, lon, _) = ecef_to_geodetic([0.0, WGS84_A_KM, 0.0]);
        assert!(lat.abs() < 1e-12);
        assert!((lon.to_degrees() - 90.0).abs() < 1e-9);

        let b = WGS84_A_KM * (1.0 - WGS84_F);
        let (lat, _, alt) = ecef_to_geodetic([0.0, 0.0, b + 100.0]);
        assert!((lat.to_degrees() - 90.0).abs() < 1e-9);
        assert!((alt - 100.0).abs() < 1e-6);
    }

    #[test]
    fn teme_rotation_preserves_radius() {
        let pos = [4000.0, -3000.0, 5000.0];
        let rotated = teme_to_ecef_position(pos, 1.234);
        let r0 = (pos[0] * pos[0] + pos[1] * pos[1] + pos[2] * pos[2]).sqrt();
        let r1 = (rotated[0] * rotated[0] + rotated[1] * rotated[1] + rotated[2] * rotated[2]).sqrt();
        assert!((r0 - r1).abs() < 1e-9);
        assert_eq!(rotated[2], pos[2]);
    }

    #[test]
    fn degenerate_positions_are_rejected() {
        let instant = at("2020-07-12T21:00:00Z");
        for position in [[0.0, 0.0, 0.0], [f64::NAN, 1.0, 1.0], [f64::INFINITY, 0.0, 0.0]] {
            let point = OrbitPoint {
                instant,
                position_teme_km: position,
            };
            assert!(matches!(
                extract_subpoint(&point),
                Err(PropagationError::Subpoint { .. })
            ));
        }
    }

    #[test]
    fn iss_subpoint_is_plausible() {
        let propagator = Sgp4Propagator::new(&iss_identity()).unwrap();
        let start = at("2020-07-12T21:00:00Z");

        for minute in 0..95 {
            let instant = start + chrono::Duration::minutes(minute);
            let point = propagator.propagate(instant).unwrap();
            let geo = extract_subpoint(&point).unwrap();
            assert!(geo.lat_deg.abs() <= 52.0, "lat {}", geo.lat_deg);
            assert!((-180.0..=180.0).contains(&geo.lon_deg));
            assert!(
                (380_000.0..=450_000.0).contains(&geo.alt_m),
                "alt {}",
                geo.alt_m
            );
        }
    }

    #[test]
    fn single_instant_batch_is_a_point() {
        let propagator = Sgp4Propagator::new(&iss_identity()).unwrap();
        let instant = at("2020-07-12T21:00:00Z");

        assert!(matches!(
            propagator.orbit_track(&[instant]).unwrap(),
            OrbitTrack::Single(_)
        ));

        let instants = [instant, instant + chrono::Duration::seconds(30)];
        let points = propagator.orbit_track(&instants).unwrap().into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].instant, instants[1]);
    }
}
