mod error;
mod parsing;

pub use error::InputError;
pub use parsing::{duration_from_seconds, parse_duration, parse_time};
