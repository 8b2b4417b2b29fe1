//! The normalization core: everything between a raw model response and a
//! tabular row. All functions here are pure; per-file failure isolation in
//! the pipeline depends on that.

pub mod duration;
pub mod experience;
pub mod repair;
pub mod sanitize;

pub use experience::{format_experience, total_experience_years};
pub use sanitize::{sanitize_model_response, SanitizeError};
