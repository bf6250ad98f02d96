use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("could not parse time string '{input}': {reason}")]
    Time { input: String, reason: String },
    #[error("could not parse duration string '{input}': {reason}")]
    Duration { input: String, reason: String },
}
