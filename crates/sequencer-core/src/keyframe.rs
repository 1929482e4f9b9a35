use serde::{Deserialize, Serialize};

use crate::rotation::Rotation;

/// A frame number on the host application's timeline (1-based).
pub type Frame = u32;

/// One (channel, frame, rotation) triple handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyframeSample {
    pub channel: String,
    pub frame: Frame,
    pub rotation: Rotation,
}

impl KeyframeSample {
    pub fn new(channel: impl Into<String>, frame: Frame, rotation: Rotation) -> Self {
        Self {
            channel: channel.into(),
            frame,
            rotation,
        }
    }
}
