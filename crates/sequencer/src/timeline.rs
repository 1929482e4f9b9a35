//! The fixed rest -> extend -> hold -> return timelines gestures are keyed on.

use handsign_core::Frame;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PosePhase {
    Rest,
    Extended,
    Held,
    Return,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimelineKind {
    /// {1, 20, 60, 90}: one-handed letters.
    #[default]
    Standard,
    /// {1, 20, 40, 60, 80, 100}: the longer two-handed hold.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineKey {
    pub frame: Frame,
    pub phase: PosePhase,
}

impl TimelineKey {
    const fn new(frame: Frame, phase: PosePhase) -> Self {
        Self { frame, phase }
    }
}

const STANDARD: [TimelineKey; 4] = [
    TimelineKey::new(1, PosePhase::Rest),
    TimelineKey::new(20, PosePhase::Extended),
    TimelineKey::new(60, PosePhase::Held),
    TimelineKey::new(90, PosePhase::Return),
];

const EXTENDED: [TimelineKey; 6] = [
    TimelineKey::new(1, PosePhase::Rest),
    TimelineKey::new(20, PosePhase::Extended),
    TimelineKey::new(40, PosePhase::Held),
    TimelineKey::new(60, PosePhase::Held),
    TimelineKey::new(80, PosePhase::Held),
    TimelineKey::new(100, PosePhase::Return),
];

/// Ordered sample times, each tagged with the pose it carries.
///
/// Always starts with a rest key and ends with a return key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    keys: &'static [TimelineKey],
}

impl Timeline {
    pub fn standard() -> Self {
        Self { keys: &STANDARD }
    }

    pub fn extended() -> Self {
        Self { keys: &EXTENDED }
    }

    pub fn keys(&self) -> &'static [TimelineKey] {
        self.keys
    }

    pub fn frames(&self) -> impl Iterator<Item = Frame> + 'static {
        self.keys.iter().map(|key| key.frame)
    }

    pub fn start(&self) -> Frame {
        self.keys[0].frame
    }

    pub fn end(&self) -> Frame {
        self.keys[self.keys.len() - 1].frame
    }
}

impl From<TimelineKind> for Timeline {
    fn from(kind: TimelineKind) -> Self {
        match kind {
            TimelineKind::Standard => Timeline::standard(),
            TimelineKind::Extended => Timeline::extended(),
        }
    }
}
