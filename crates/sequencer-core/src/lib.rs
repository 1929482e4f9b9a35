//! Engine independent building blocks for gesture clips.
//!
//! Everything a pose sequencer needs to describe an animation without
//! knowing which host application will eventually play it back: Euler
//! rotations and their unit conversions, keyframe samples, the render
//! format and the [`backend::AnimationBackend`] boundary.

pub mod backend;
pub mod error;
pub mod format;
pub mod keyframe;
pub mod rotation;

pub use backend::AnimationBackend;
pub use error::{HandsignCoreError, Result};
pub use format::{Container, RenderFormat, VideoCodec};
pub use keyframe::{Frame, KeyframeSample};
pub use rotation::{degrees_to_radians, radians_to_degrees, Angle, EulerAngles, Rotation};
