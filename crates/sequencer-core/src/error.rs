use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HandsignCoreError>;

#[derive(Error, Debug)]
pub enum HandsignCoreError {
    #[error("Object not found in scene: {0:?}")]
    MissingObject(String),

    #[error("Channel {channel:?} not found on object {object:?}")]
    MissingChannel { object: String, channel: String },

    #[error("Background image not found: {0:?}")]
    MissingBackground(PathBuf),

    #[error("Invalid frame range {start}..={end}")]
    FrameRange { start: u32, end: u32 },

    #[error("Failed to launch {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program:?} exited with {}", exit_code_label(.code))]
    ProcessExit { program: String, code: Option<i32> },

    #[error("Backend io: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend: {0}")]
    Backend(String),
}

impl HandsignCoreError {
    pub fn missing_channel(object: &str, channel: &str) -> Self {
        Self::MissingChannel {
            object: object.to_string(),
            channel: channel.to_string(),
        }
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
