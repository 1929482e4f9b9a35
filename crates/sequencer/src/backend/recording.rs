//! An in-memory scene that records everything written into it.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use handsign_core::{AnimationBackend, Frame, HandsignCoreError, RenderFormat, Rotation};
use indexmap::IndexMap;
use slotmap::{new_key_type, SlotMap};

use crate::{
    animation::{ChannelCurve, HandsignAnimationError, Interpolation},
    skeleton::Skeleton,
};

new_key_type! {
    pub struct ObjectKey;
}

#[derive(Debug, Clone, Default)]
pub struct PoseChannel {
    pub current: Rotation,
    pub keys: BTreeMap<Frame, Rotation>,
}

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub channels: IndexMap<String, PoseChannel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub output: PathBuf,
    pub format: RenderFormat,
    pub frame_range: Option<(Frame, Frame)>,
    pub background: Option<PathBuf>,
    pub keyframes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    objects: SlotMap<ObjectKey, SceneObject>,
    lookup: HashMap<String, ObjectKey>,
    frame_range: Option<(Frame, Frame)>,
    background: Option<PathBuf>,
    renders: Vec<RenderRequest>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene holding one armature with every channel of `skeleton`.
    pub fn with_skeleton(skeleton: &Skeleton) -> Self {
        let mut backend = Self::new();
        backend.add_object(&skeleton.armature, skeleton.channels());
        backend
    }

    pub fn add_object<'a>(
        &mut self,
        name: &str,
        channels: impl IntoIterator<Item = &'a str>,
    ) -> ObjectKey {
        let object = SceneObject {
            name: name.to_string(),
            channels: channels
                .into_iter()
                .map(|channel| (channel.to_string(), PoseChannel::default()))
                .collect(),
        };

        let key = self.objects.insert(object);
        if let Some(previous) = self.lookup.insert(name.to_string(), key) {
            self.objects.remove(previous);
        }
        key
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.lookup.get(name).and_then(|key| self.objects.get(*key))
    }

    fn object_mut(&mut self, name: &str) -> handsign_core::Result<&mut SceneObject> {
        self.lookup
            .get(name)
            .and_then(|key| self.objects.get_mut(*key))
            .ok_or_else(|| HandsignCoreError::MissingObject(name.to_string()))
    }

    fn channel_mut(&mut self, object: &str, channel: &str) -> handsign_core::Result<&mut PoseChannel> {
        self.object_mut(object)?
            .channels
            .get_mut(channel)
            .ok_or_else(|| HandsignCoreError::missing_channel(object, channel))
    }

    pub fn keys(&self, object: &str, channel: &str) -> Option<&BTreeMap<Frame, Rotation>> {
        self.object(object)
            .and_then(|object| object.channels.get(channel))
            .map(|channel| &channel.keys)
    }

    /// Channels that carry at least one key, in skeleton order.
    pub fn keyed_channels(&self, object: &str) -> Vec<&str> {
        self.object(object)
            .map(|object| {
                object
                    .channels
                    .iter()
                    .filter(|(_, channel)| !channel.keys.is_empty())
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn keyframe_count(&self) -> usize {
        self.objects
            .values()
            .flat_map(|object| object.channels.values())
            .map(|channel| channel.keys.len())
            .sum()
    }

    pub fn curve(
        &self,
        object: &str,
        channel: &str,
        interpolation: Interpolation,
    ) -> crate::animation::Result<ChannelCurve> {
        let scene_object = self
            .object(object)
            .ok_or_else(|| HandsignAnimationError::MissingObject(object.to_string()))?;
        let pose_channel =
            scene_object
                .channels
                .get(channel)
                .ok_or_else(|| HandsignAnimationError::MissingChannel {
                    object: object.to_string(),
                    channel: channel.to_string(),
                })?;

        if pose_channel.keys.is_empty() {
            return Err(HandsignAnimationError::EmptyCurve {
                object: object.to_string(),
                channel: channel.to_string(),
            });
        }

        ChannelCurve::from_keys(channel, &pose_channel.keys, interpolation)
    }

    /// The rotation the host would show for `channel` at `frame`.
    pub fn sample(
        &self,
        object: &str,
        channel: &str,
        frame: f64,
        interpolation: Interpolation,
    ) -> crate::animation::Result<Rotation> {
        let curve = self.curve(object, channel, interpolation)?;
        curve
            .sample(frame)
            .ok_or_else(|| HandsignAnimationError::EmptyCurve {
                object: object.to_string(),
                channel: channel.to_string(),
            })
    }

    pub fn frame_range(&self) -> Option<(Frame, Frame)> {
        self.frame_range
    }

    pub fn background(&self) -> Option<&Path> {
        self.background.as_deref()
    }

    pub fn renders(&self) -> &[RenderRequest] {
        &self.renders
    }
}

impl AnimationBackend for RecordingBackend {
    fn clear_animation(&mut self, object: &str) -> handsign_core::Result<()> {
        for channel in self.object_mut(object)?.channels.values_mut() {
            channel.keys.clear();
        }
        Ok(())
    }

    fn channel_exists(&self, object: &str, channel: &str) -> bool {
        self.object(object)
            .is_some_and(|object| object.channels.contains_key(channel))
    }

    fn set_rotation(
        &mut self,
        object: &str,
        channel: &str,
        rotation: Rotation,
    ) -> handsign_core::Result<()> {
        self.channel_mut(object, channel)?.current = rotation;
        Ok(())
    }

    fn insert_keyframe(&mut self, object: &str, channel: &str, frame: Frame) -> handsign_core::Result<()> {
        let pose_channel = self.channel_mut(object, channel)?;
        pose_channel.keys.insert(frame, pose_channel.current);
        Ok(())
    }

    fn set_frame_range(&mut self, start: Frame, end: Frame) -> handsign_core::Result<()> {
        if start > end {
            return Err(HandsignCoreError::FrameRange { start, end });
        }
        self.frame_range = Some((start, end));
        Ok(())
    }

    fn set_background_image(&mut self, path: &Path) -> handsign_core::Result<()> {
        self.background = Some(path.to_path_buf());
        Ok(())
    }

    fn render_animation(&mut self, output: &Path, format: RenderFormat) -> handsign_core::Result<()> {
        let request = RenderRequest {
            output: output.to_path_buf(),
            format,
            frame_range: self.frame_range,
            background: self.background.clone(),
            keyframes: self.keyframe_count(),
        };
        tracing::debug!("recorded render of {} keys to {}", request.keyframes, output.display());
        self.renders.push(request);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn backend() -> RecordingBackend {
        let mut backend = RecordingBackend::new();
        backend.add_object("rig", ["right_index1", "right_wrist"]);
        backend
    }

    #[test]
    fn test_set_then_insert() {
        let mut backend = backend();
        let target = Rotation::from_degrees(10.0, 0.0, 0.0);

        backend.set_rotation("rig", "right_index1", target).unwrap();
        backend.insert_keyframe("rig", "right_index1", 20).unwrap();
        backend.insert_keyframe("rig", "right_index1", 60).unwrap();
        backend.set_rotation("rig", "right_index1", Rotation::ZERO).unwrap();
        backend.insert_keyframe("rig", "right_index1", 90).unwrap();

        let keys = backend.keys("rig", "right_index1").unwrap();
        assert_eq!(keys.len(), 3);
        assert_eq!(keys[&60], target);
        assert_eq!(keys[&90], Rotation::ZERO);
        assert_eq!(backend.keyed_channels("rig"), vec!["right_index1"]);
    }

    #[test]
    fn test_missing_object_and_channel() {
        let mut backend = backend();
        assert!(matches!(
            backend.clear_animation("SMPLX-female"),
            Err(HandsignCoreError::MissingObject(name)) if name == "SMPLX-female"
        ));
        assert!(!backend.channel_exists("rig", "left_index1"));
        assert!(!backend.channel_exists("other", "right_index1"));
        assert!(matches!(
            backend.insert_keyframe("rig", "left_index1", 1),
            Err(HandsignCoreError::MissingChannel { .. })
        ));
    }

    #[test]
    fn test_clear_wipes_keys() {
        let mut backend = backend();
        backend.insert_keyframe("rig", "right_wrist", 1).unwrap();
        assert_eq!(backend.keyframe_count(), 1);
        backend.clear_animation("rig").unwrap();
        assert_eq!(backend.keyframe_count(), 0);
    }

    #[test]
    fn test_sample_between_keys() {
        let mut backend = backend();
        backend.insert_keyframe("rig", "right_wrist", 1).unwrap();
        backend
            .set_rotation("rig", "right_wrist", Rotation::from_radians(0.0, 1.0, 0.0))
            .unwrap();
        backend.insert_keyframe("rig", "right_wrist", 21).unwrap();

        let linear = backend
            .sample("rig", "right_wrist", 11.0, Interpolation::Linear)
            .unwrap();
        assert!(linear.abs_diff_eq(Rotation::from_radians(0.0, 0.5, 0.0), 1e-12));

        let constant = backend
            .sample("rig", "right_wrist", 11.0, Interpolation::Constant)
            .unwrap();
        assert_eq!(constant, Rotation::ZERO);

        assert!(matches!(
            backend.sample("rig", "right_index1", 1.0, Interpolation::Linear),
            Err(HandsignAnimationError::EmptyCurve { .. })
        ));
    }

    #[test]
    fn test_render_request() {
        let mut backend = backend();
        backend.set_frame_range(1, 90).unwrap();
        backend.set_background_image(Path::new("bg.png")).unwrap();
        backend
            .render_animation(Path::new("out/a.mp4"), RenderFormat::default())
            .unwrap();

        let render = &backend.renders()[0];
        assert_eq!(render.frame_range, Some((1, 90)));
        assert_eq!(render.background.as_deref(), Some(Path::new("bg.png")));
        assert!(backend.set_frame_range(10, 1).is_err());
    }
}
