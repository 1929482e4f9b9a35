//! Animation error types and results.

use thiserror::Error;

/// Animation result type.
pub type Result<T> = std::result::Result<T, HandsignAnimationError>;

/// Errors related to sampling recorded keyframes.
#[derive(Error, Debug)]
pub enum HandsignAnimationError {
    #[error("[animation] no keyframes on {object:?}/{channel:?}")]
    EmptyCurve { object: String, channel: String },

    #[error("[animation] missing object {0:?}")]
    MissingObject(String),

    #[error("[animation] missing channel {object:?}/{channel:?}")]
    MissingChannel { object: String, channel: String },

    #[error("[animation] {times} times but {values} values")]
    Mismatch { times: usize, values: usize },
}
