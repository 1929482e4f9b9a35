use std::path::{Path, PathBuf};

use handsign_core::RenderFormat;
use serde::{Deserialize, Serialize};

use super::{
    binding::{Side, SkeletonBinding},
    error::{HandsignGestureError, Result},
    limb::LimbOverride,
    table::JointAngleTable,
};
use crate::timeline::{Timeline, TimelineKind};

pub const DEFAULT_ARMATURE: &str = "SMPLX-female";

fn default_armature() -> String {
    DEFAULT_ARMATURE.to_string()
}

/// One letter or word: literal pose data plus where it is rendered to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GestureDefinition {
    pub name: String,
    #[serde(default = "default_armature")]
    pub armature: String,
    #[serde(default)]
    pub timeline: TimelineKind,
    /// Which hand the finger table is bound to.
    #[serde(default)]
    pub hand: Side,
    #[serde(default, skip_serializing_if = "JointAngleTable::is_empty")]
    pub fingers: JointAngleTable,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub limbs: Vec<LimbOverride>,
    /// Laid over the SMPL-X binding for `hand`.
    #[serde(default, skip_serializing_if = "SkeletonBinding::is_empty")]
    pub binding: SkeletonBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
}

impl GestureDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            armature: default_armature(),
            timeline: TimelineKind::default(),
            hand: Side::default(),
            fingers: JointAngleTable::default(),
            limbs: Vec::new(),
            binding: SkeletonBinding::default(),
            output: None,
            background: None,
        }
    }

    pub fn with_fingers(mut self, fingers: JointAngleTable) -> Self {
        self.fingers = fingers;
        self
    }

    pub fn with_limb(mut self, limb: LimbOverride) -> Self {
        self.limbs.push(limb);
        self
    }

    pub fn with_timeline(mut self, timeline: TimelineKind) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn with_binding(mut self, binding: SkeletonBinding) -> Self {
        self.binding = binding;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
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

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn timeline(&self) -> Timeline {
        self.timeline.into()
    }

    pub fn skeleton_binding(&self) -> SkeletonBinding {
        SkeletonBinding::smplx_hand(self.hand).merged(&self.binding)
    }

    /// The artifact file name for the gesture looked up as `id`:
    /// `<id>.<ext>` unless the definition names its own file.
    pub fn output_name(&self, id: &str, format: RenderFormat) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => format!("{id}.{}", format.extension()),
        }
    }
}

#[cfg(test)]
mod test {
    use handsign_core::EulerAngles;

    use super::*;
    use crate::gesture::JointId;

    #[test]
    fn test_minimal_json() {
        let definition = GestureDefinition::from_json(
            r#"{ "name": "a", "fingers": { "index": { "base": [10, 20, 30] } } }"#,
        )
        .unwrap();

        assert_eq!(definition.armature, DEFAULT_ARMATURE);
        assert_eq!(definition.timeline, TimelineKind::Standard);
        assert_eq!(definition.hand, Side::Right);
        assert_eq!(definition.output_name("a", RenderFormat::default()), "a.mp4");
        assert_eq!(
            definition.fingers.get(&JointId::new("index", "base")),
            Some(EulerAngles::degrees(10.0, 20.0, 30.0))
        );
        assert_eq!(
            definition
                .skeleton_binding()
                .channel(&JointId::new("index", "base")),
            Some("right_index1")
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(GestureDefinition::from_json(r#"{ "name": "a", "fingerz": {} }"#).is_err());
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        match GestureDefinition::load(&path) {
            Err(HandsignGestureError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parse error, got {other:?}"),
        }

        assert!(matches!(
            GestureDefinition::load(dir.path().join("missing.json")),
            Err(HandsignGestureError::Read { .. })
        ));
    }

    #[test]
    fn test_pretty_json_reloads() {
        let definition = GestureDefinition::new("b")
            .with_timeline(TimelineKind::Extended)
            .with_fingers(JointAngleTable::new().with("thumb", "tip", EulerAngles::degrees(1.0, 2.0, 3.0)));
        let json = definition.to_json_pretty().unwrap();
        assert_eq!(GestureDefinition::from_json(&json).unwrap(), definition);
    }

    #[test]
    fn test_output_name() {
        let mut definition = GestureDefinition::new("hello");
        assert_eq!(definition.output_name("hi", RenderFormat::default()), "hi.mp4");
        definition.output = Some("wave.mp4".to_string());
        assert_eq!(definition.output_name("hi", RenderFormat::default()), "wave.mp4");
    }
}
