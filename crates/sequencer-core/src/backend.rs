//! The boundary between pose data and a host 3D application.

use std::path::Path;

use crate::{error::Result, format::RenderFormat, keyframe::Frame, rotation::Rotation};

/// A host application that can hold keyframes on a skeleton and render them.
///
/// Keyframes are written with the two-step pattern hosts expose: set the
/// channel's current rotation, then sample it at a frame.
pub trait AnimationBackend {
    /// Wipes prior keyframe data for `object`. Fails with
    /// [`crate::HandsignCoreError::MissingObject`] if there is no such object.
    fn clear_animation(&mut self, object: &str) -> Result<()>;

    /// Whether `object` has a pose channel named `channel`. A missing object
    /// has no channels.
    fn channel_exists(&self, object: &str, channel: &str) -> bool;

    /// Sets the channel's current rotation. Nothing is keyed until
    /// [`AnimationBackend::insert_keyframe`].
    fn set_rotation(&mut self, object: &str, channel: &str, rotation: Rotation) -> Result<()>;

    /// Samples the channel's current rotation at `frame`.
    fn insert_keyframe(&mut self, object: &str, channel: &str, frame: Frame) -> Result<()>;

    /// Sets the scene's playback range, both ends inclusive. Fails with
    /// [`crate::HandsignCoreError::FrameRange`] if `start > end`.
    fn set_frame_range(&mut self, start: Frame, end: Frame) -> Result<()>;

    /// Places the image behind the rendered character.
    fn set_background_image(&mut self, path: &Path) -> Result<()>;

    /// Renders every keyframe written so far. Blocks until the artifact exists.
    fn render_animation(&mut self, output: &Path, format: RenderFormat) -> Result<()>;
}

impl<B: AnimationBackend + ?Sized> AnimationBackend for &mut B {
    fn clear_animation(&mut self, object: &str) -> Result<()> {
        (**self).clear_animation(object)
    }

    fn channel_exists(&self, object: &str, channel: &str) -> bool {
        (**self).channel_exists(object, channel)
    }

    fn set_rotation(&mut self, object: &str, channel: &str, rotation: Rotation) -> Result<()> {
        (**self).set_rotation(object, channel, rotation)
    }

    fn insert_keyframe(&mut self, object: &str, channel: &str, frame: Frame) -> Result<()> {
        (**self).insert_keyframe(object, channel, frame)
    }

    fn set_frame_range(&mut self, start: Frame, end: Frame) -> Result<()> {
        (**self).set_frame_range(start, end)
    }

    fn set_background_image(&mut self, path: &Path) -> Result<()> {
        (**self).set_background_image(path)
    }

    fn render_animation(&mut self, output: &Path, format: RenderFormat) -> Result<()> {
        (**self).render_animation(output, format)
    }
}
