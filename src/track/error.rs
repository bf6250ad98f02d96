use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("invalid tle: {0}")]
    InvalidTle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("propagation failed at {instant}: {message}")]
    Propagation {
        instant: DateTime<Utc>,
        message: String,
    },
    #[error("no usable sub-satellite point at {instant}: {reason}")]
    Subpoint {
        instant: DateTime<Utc>,
        reason: String,
    },
}
