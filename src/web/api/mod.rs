pub mod error;
pub mod tools;
