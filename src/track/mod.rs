mod error;
mod footprint;
mod ground_track;
mod propagation;
mod types;

pub use error::PropagationError;
pub use footprint::{footprint, FootprintParams, FootprintPolygon};
pub use ground_track::generate;
pub use propagation::{extract_subpoint, Propagator, Sgp4Propagator};
pub use types::{
    BatchPolicy, GeoPoint, GroundTrack, OrbitPoint, OrbitTrack, SampleOrigin, TimeSample,
};

pub const WGS84_A_KM: f64 = 6378.137;
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
