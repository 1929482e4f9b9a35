//! Gesture data error types and results.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HandsignGestureError>;

#[derive(Error, Debug)]
pub enum HandsignGestureError {
    #[error("[gesture] unable to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[gesture] malformed definition {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("[gesture] {0}")]
    Json(#[from] serde_json::Error),

    #[error("[gesture] joint id must look like \"limb.segment\", got {0:?}")]
    InvalidJointId(String),
}
