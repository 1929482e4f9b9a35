use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Container {
    #[strum(serialize = "MPEG4")]
    Mpeg4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum VideoCodec {
    #[strum(serialize = "H264")]
    H264,
}

/// The container/codec pair a clip is encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RenderFormat {
    pub container: Container,
    pub codec: VideoCodec,
}

impl RenderFormat {
    pub const MP4_H264: Self = Self {
        container: Container::Mpeg4,
        codec: VideoCodec::H264,
    };

    pub fn extension(&self) -> &'static str {
        match self.container {
            Container::Mpeg4 => "mp4",
        }
    }
}

impl Default for RenderFormat {
    fn default() -> Self {
        Self::MP4_H264
    }
}
