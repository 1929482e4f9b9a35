//! [`AnimationBackend`](handsign_core::AnimationBackend) implementations.

#[cfg(feature = "blender")]
pub mod blender;
pub mod recording;

#[cfg(feature = "blender")]
pub use blender::{BlenderBackend, BlenderSettings, RenderEngine};
pub use recording::{RecordingBackend, RenderRequest};
