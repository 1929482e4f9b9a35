//! Which armature a backend animates and which channels it carries.

use std::path::Path;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::gesture::{HandsignGestureError, DEFAULT_ARMATURE};

const SMPLX_BODY: [&str; 25] = [
    "pelvis",
    "left_hip",
    "right_hip",
    "spine1",
    "left_knee",
    "right_knee",
    "spine2",
    "left_ankle",
    "right_ankle",
    "spine3",
    "left_foot",
    "right_foot",
    "neck",
    "left_collar",
    "right_collar",
    "head",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "jaw",
    "left_eye_smplhf",
    "right_eye_smplhf",
];

const SMPLX_FINGERS: [&str; 5] = ["index", "middle", "pinky", "ring", "thumb"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub armature: String,
    channels: IndexSet<String>,
}

impl Skeleton {
    pub fn new(armature: impl Into<String>, channels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            armature: armature.into(),
            channels: channels.into_iter().map(Into::into).collect(),
        }
    }

    /// The SMPL-X body and hand joints.
    pub fn smplx(armature: impl Into<String>) -> Self {
        let mut channels: IndexSet<String> = SMPLX_BODY.iter().map(|name| name.to_string()).collect();
        for side in ["left", "right"] {
            for finger in SMPLX_FINGERS {
                for n in 1..=3 {
                    channels.insert(format!("{side}_{finger}{n}"));
                }
            }
        }

        Self {
            armature: armature.into(),
            channels,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HandsignGestureError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| HandsignGestureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| HandsignGestureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn contains(&self, channel: &str) -> bool {
        self.channels.contains(channel)
    }

    pub fn channels(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub fn without(mut self, channel: &str) -> Self {
        self.channels.shift_remove(channel);
        self
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::smplx(DEFAULT_ARMATURE)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_smplx_joints() {
        let skeleton = Skeleton::default();
        assert_eq!(skeleton.armature, "SMPLX-female");
        assert_eq!(skeleton.len(), 25 + 30);
        for channel in ["right_shoulder", "right_elbow", "right_index1", "left_thumb3"] {
            assert!(skeleton.contains(channel), "{channel}");
        }
        assert!(!skeleton.contains("right_index4"));
    }

    #[test]
    fn test_without() {
        let skeleton = Skeleton::smplx("rig").without("right_index1");
        assert!(!skeleton.contains("right_index1"));
        assert!(skeleton.contains("right_index2"));
    }
}
