use handsign_core::{EulerAngles, Frame};
use serde::{Deserialize, Serialize};

use crate::timeline::PosePhase;

/// Arm-level pose (shoulder, elbow, wrist) keyed directly on a channel.
///
/// Unlike finger entries, rest and return need not be zero: several
/// gestures start from and return to a lowered arm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimbOverride {
    pub channel: String,
    #[serde(default)]
    pub rest: EulerAngles,
    pub target: EulerAngles,
    /// Defaults to `target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub held: Option<EulerAngles>,
    /// Defaults to `rest`.
    #[serde(default, rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_to: Option<EulerAngles>,
    /// Extra literal keys, e.g. a wrist wave during the hold. A key on a
    /// timeline frame replaces that frame's pose.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accents: Vec<LimbAccent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimbAccent {
    pub frame: Frame,
    pub rotation: EulerAngles,
}

impl LimbOverride {
    pub fn new(channel: impl Into<String>, rest: EulerAngles, target: EulerAngles) -> Self {
        Self {
            channel: channel.into(),
            rest,
            target,
            held: None,
            return_to: None,
            accents: Vec::new(),
        }
    }

    pub fn with_held(mut self, held: EulerAngles) -> Self {
        self.held = Some(held);
        self
    }

    pub fn with_return(mut self, return_to: EulerAngles) -> Self {
        self.return_to = Some(return_to);
        self
    }

    pub fn with_accent(mut self, frame: Frame, rotation: EulerAngles) -> Self {
        self.accents.push(LimbAccent { frame, rotation });
        self
    }

    pub fn pose_for(&self, phase: PosePhase) -> EulerAngles {
        match phase {
            PosePhase::Rest => self.rest,
            PosePhase::Extended => self.target,
            PosePhase::Held => self.held.unwrap_or(self.target),
            PosePhase::Return => self.return_to.unwrap_or(self.rest),
        }
    }
}
