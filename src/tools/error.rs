use thiserror::Error;

use crate::catalog::CatalogError;
use crate::input::InputError;
use crate::telemetry::TelemetryError;
use crate::track::PropagationError;
use crate::validation::ValidationError;

/// Tool failure. The message is meant to be shown to the caller as is.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Propagation(#[from] PropagationError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}
