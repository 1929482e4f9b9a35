use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::table::JointId;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    Left,
    #[default]
    Right,
}

/// Joint segment -> skeleton channel name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkeletonBinding(IndexMap<JointId, String>);

impl SkeletonBinding {
    pub const FINGERS: [&'static str; 5] = ["thumb", "index", "middle", "ring", "pinky"];
    pub const SEGMENTS: [&'static str; 3] = ["base", "mid", "tip"];

    pub fn new() -> Self {
        Self::default()
    }

    /// SMPL-X finger bones: `index.base` -> `right_index1`, `index.tip` -> `right_index3`.
    pub fn smplx_hand(side: Side) -> Self {
        let mut binding = Self::new();
        for finger in Self::FINGERS {
            for (n, segment) in Self::SEGMENTS.iter().enumerate() {
                binding.insert(
                    JointId::new(finger, *segment),
                    format!("{side}_{finger}{}", n + 1),
                );
            }
        }
        binding
    }

    pub fn insert(&mut self, joint: JointId, channel: impl Into<String>) -> Option<String> {
        self.0.insert(joint, channel.into())
    }

    pub fn bind(mut self, joint: JointId, channel: impl Into<String>) -> Self {
        self.insert(joint, channel);
        self
    }

    pub fn channel(&self, joint: &JointId) -> Option<&str> {
        self.0.get(joint).map(String::as_str)
    }

    /// `self` with every entry of `overrides` laid on top.
    pub fn merged(&self, overrides: &SkeletonBinding) -> Self {
        let mut merged = self.clone();
        for (joint, channel) in overrides.0.iter() {
            merged.insert(joint.clone(), channel.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&JointId, &str)> {
        self.0.iter().map(|(joint, channel)| (joint, channel.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
