use std::{fmt, str::FromStr};

use handsign_core::EulerAngles;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::HandsignGestureError;

/// A joint segment on a limb, written `limb.segment` (e.g. `index.base`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JointId {
    pub limb: String,
    pub segment: String,
}

impl JointId {
    pub fn new(limb: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            limb: limb.into(),
            segment: segment.into(),
        }
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.limb, self.segment)
    }
}

impl FromStr for JointId {
    type Err = HandsignGestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((limb, segment))
                if !limb.is_empty() && !segment.is_empty() && !segment.contains('.') =>
            {
                Ok(Self::new(limb, segment))
            }
            _ => Err(HandsignGestureError::InvalidJointId(s.to_string())),
        }
    }
}

impl TryFrom<String> for JointId {
    type Error = HandsignGestureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JointId> for String {
    fn from(id: JointId) -> Self {
        id.to_string()
    }
}

/// Target angles per limb and segment, in authoring order.
///
/// ```json
/// { "index": { "base": [10, 20, 30], "mid": [0, 0, 0] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointAngleTable(IndexMap<String, IndexMap<String, EulerAngles>>);

impl JointAngleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        limb: impl Into<String>,
        segment: impl Into<String>,
        angles: EulerAngles,
    ) -> Option<EulerAngles> {
        self.0
            .entry(limb.into())
            .or_default()
            .insert(segment.into(), angles)
    }

    pub fn with(
        mut self,
        limb: impl Into<String>,
        segment: impl Into<String>,
        angles: EulerAngles,
    ) -> Self {
        self.insert(limb, segment, angles);
        self
    }

    pub fn get(&self, joint: &JointId) -> Option<EulerAngles> {
        self.0
            .get(&joint.limb)
            .and_then(|segments| segments.get(&joint.segment))
            .copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (JointId, EulerAngles)> + '_ {
        self.0.iter().flat_map(|(limb, segments)| {
            segments
                .iter()
                .map(move |(segment, angles)| (JointId::new(limb.as_str(), segment.as_str()), *angles))
        })
    }

    pub fn len(&self) -> usize {
        self.0.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
