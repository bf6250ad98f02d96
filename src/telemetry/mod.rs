mod error;
mod format;
mod types;

pub use error::TelemetryError;
pub use format::{format_message, format_response};
pub use types::{MessageExtras, PositionLla, TelemetryMessage, TrajectoryPoint};
