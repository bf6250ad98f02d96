use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("satellite '{0}' not found, please provide a valid satellite name or NORAD ID")]
    NotFound(String),
    #[error("failed to fetch TLE from CelesTrak for NORAD ID {norad_id}: {message}")]
    Transport { norad_id: u32, message: String },
    #[error("HTTP error {status} while fetching TLE for NORAD ID {norad_id}: {body}")]
    Http {
        norad_id: u32,
        status: u16,
        body: String,
    },
    #[error("invalid TLE data for NORAD ID {norad_id}: {message}")]
    InvalidElements { norad_id: u32, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
