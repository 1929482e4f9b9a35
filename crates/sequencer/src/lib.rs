//! Gesture keyframe sequencing.
//!
//! A [`gesture::GestureDefinition`] is literal pose data. The
//! [`sequencer`] expands it over a fixed [`timeline::Timeline`] into
//! per-channel keyframes and writes them into an
//! [`core::AnimationBackend`], which renders the clip.

pub mod animation;
pub mod backend;
pub mod batch;
pub mod gesture;
pub mod process;
pub mod sequencer;
pub mod skeleton;
pub mod spell;
pub mod timeline;
pub mod core {
    pub use handsign_core::*;
}

pub use gesture::GestureDefinition;
pub use sequencer::{render_gesture, sequence, write_gesture, PoseSequence};
pub use skeleton::Skeleton;
pub use timeline::{PosePhase, Timeline, TimelineKind};
