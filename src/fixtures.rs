//! Shared test doubles and element sets.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::catalog::{
    Catalog, CatalogEntry, CatalogError, OrbitalElementSet, SatelliteIdentity, SearchOutcome,
};
use crate::track::{OrbitPoint, OrbitTrack, PropagationError, Propagator};

pub const ISS_LINE1: &str =
    "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
pub const ISS_LINE2: &str =
    "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

pub const NOAA21_LINE1: &str =
    "1 54234U 22150A   25076.92835707  .00000366  00000-0  19403-3 0  9994";
pub const NOAA21_LINE2: &str =
    "2 54234  98.7204  17.0432 0002710  72.7407 287.4066 14.19556514121811";

pub fn iss_identity() -> SatelliteIdentity {
    SatelliteIdentity {
        norad_id: 25544,
        name: "ISS (ZARYA)".to_string(),
        elements: OrbitalElementSet::new(ISS_LINE1, ISS_LINE2).unwrap(),
    }
}

/// In-memory catalog. Search matches names case-insensitively in
/// insertion order; fetches for unknown ids fail like a dropped connection.
#[derive(Default)]
pub struct MockCatalog {
    entries: Vec<CatalogEntry>,
    elements: HashMap<u32, String>,
    unreachable: bool,
    search_calls: AtomicUsize,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, norad_id: u32, name: &str) -> Self {
        self.entries.push(CatalogEntry {
            norad_id,
            name: name.to_string(),
            object_type: "PAY".to_string(),
            country: "US".to_string(),
            launch_date: "2000-01-01".to_string(),
        });
        self
    }

    pub fn with_elements(mut self, norad_id: u32, text: &str) -> Self {
        self.elements.insert(norad_id, text.to_string());
        self
    }

    pub fn iss() -> Self {
        Self::new()
            .with_entry(25544, "ISS (ZARYA)")
            .with_elements(25544, &format!("{ISS_LINE1}\n{ISS_LINE2}"))
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn search(&self, query: &str, limit: usize) -> SearchOutcome {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable {
            return SearchOutcome::Unreachable("connection refused".to_string());
        }

        let query = query.to_lowercase();
        SearchOutcome::Found(
            self.entries
                .iter()
                .filter(|e| e.name.to_lowercase().contains(&query))
                .take(limit)
                .cloned()
                .collect(),
        )
    }

    async fn fetch_elements(&self, norad_id: u32) -> Result<String, CatalogError> {
        self.elements
            .get(&norad_id)
            .cloned()
            .ok_or_else(|| CatalogError::Transport {
                norad_id,
                message: "connection reset".to_string(),
            })
    }
}

/// Propagator on a fixed equatorial circle, about 400 km up. Each
/// failure mode is switched on separately.
#[derive(Default)]
pub struct StubPropagator {
    batch_limit: Option<usize>,
    failing_batch: bool,
    failing_everywhere: bool,
    failing_at: Vec<DateTime<Utc>>,
    degenerate_at: Vec<DateTime<Utc>>,
    single_calls: Cell<usize>,
}

impl StubPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batch calls return at most `limit` points.
    pub fn batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    pub fn failing_batch(mut self) -> Self {
        self.failing_batch = true;
        self
    }

    pub fn failing_everywhere(mut self) -> Self {
        self.failing_everywhere = true;
        self
    }

    pub fn failing_at(mut self, instant: DateTime<Utc>) -> Self {
        self.failing_at.push(instant);
        self
    }

    pub fn degenerate_at(mut self, instant: DateTime<Utc>) -> Self {
        self.degenerate_at.push(instant);
        self
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.get()
    }

    fn point(&self, instant: DateTime<Utc>) -> Result<OrbitPoint, PropagationError> {
        if self.failing_everywhere || self.failing_at.contains(&instant) {
            return Err(PropagationError::Propagation {
                instant,
                message: "stub failure".to_string(),
            });
        }

        let position_teme_km = if self.degenerate_at.contains(&instant) {
            [0.0, 0.0, 0.0]
        } else {
            let angle = instant.timestamp() as f64 / 900.0;
            [6778.0 * angle.cos(), 6778.0 * angle.sin(), 0.0]
        };
        Ok(OrbitPoint {
            instant,
            position_teme_km,
        })
    }
}

impl Propagator for StubPropagator {
    fn orbit_track(&self, instants: &[DateTime<Utc>]) -> Result<OrbitTrack, PropagationError> {
        if self.failing_batch {
            return Err(PropagationError::Propagation {
                instant: instants.first().copied().unwrap_or_else(Utc::now),
                message: "stub batch failure".to_string(),
            });
        }

        let take = self.batch_limit.unwrap_or(instants.len());
        let points = instants
            .iter()
            .take(take)
            .map(|instant| self.point(*instant))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrbitTrack::Series(points))
    }

    fn propagate(&self, instant: DateTime<Utc>) -> Result<OrbitPoint, PropagationError> {
        self.single_calls.set(self.single_calls.get() + 1);
        self.point(instant)
    }
}
