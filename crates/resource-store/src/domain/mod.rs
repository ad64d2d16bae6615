//! Domain layer: query matching and store errors.

pub mod errors;
pub mod matching;
