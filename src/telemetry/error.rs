use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("satellite id must not be empty")]
    EmptyId,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
