//! Expands a gesture definition into per-channel keyframes.
//!
//! Finger entries follow zero -> target -> target (held) -> zero. Limb
//! overrides follow their own rest/target/held/return poses. A channel the
//! skeleton does not have is skipped without error.

use std::{collections::BTreeMap, path::Path};

use handsign_core::{AnimationBackend, Frame, KeyframeSample, RenderFormat, Rotation};
use indexmap::IndexMap;
use serde::Serialize;

use crate::{gesture::GestureDefinition, timeline::PosePhase};

/// Keys per channel, each ordered by frame. Channels keep the order they
/// were first keyed in (limbs before fingers).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PoseSequence {
    channels: IndexMap<String, BTreeMap<Frame, Rotation>>,
}

impl PoseSequence {
    /// Keyed channels, in the order they were first keyed.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.keys().map(String::as_str)
    }

    /// The keys of one channel by frame, `None` if it was never keyed.
    pub fn keys(&self, channel: &str) -> Option<&BTreeMap<Frame, Rotation>> {
        self.channels.get(channel)
    }

    /// The keys of one channel as samples, ordered by frame.
    pub fn channel_samples(&self, channel: &str) -> Vec<KeyframeSample> {
        self.channels
            .get_key_value(channel)
            .map(|(name, keys)| {
                keys.iter()
                    .map(|(frame, rotation)| KeyframeSample::new(name.as_str(), *frame, *rotation))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total keys across every channel.
    pub fn len(&self) -> usize {
        self.channels.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    // a channel keyed twice keeps the later value per frame
    fn key_channel(&mut self, channel: &str, keys: impl IntoIterator<Item = (Frame, Rotation)>) {
        self.channels
            .entry(channel.to_string())
            .or_default()
            .extend(keys);
    }
}

/// Keys every available channel of `definition` over its timeline.
///
/// `is_available` answers whether the target skeleton has a channel.
pub fn sequence(definition: &GestureDefinition, is_available: impl Fn(&str) -> bool) -> PoseSequence {
    let timeline = definition.timeline();
    let binding = definition.skeleton_binding();
    let mut sequence = PoseSequence::default();

    for limb in &definition.limbs {
        if !is_available(&limb.channel) {
            tracing::debug!("{}: no channel {:?}, skipping limb", definition.name, limb.channel);
            continue;
        }

        let phases = timeline
            .keys()
            .iter()
            .map(|key| (key.frame, limb.pose_for(key.phase).to_rotation()));
        let accents = limb
            .accents
            .iter()
            .map(|accent| (accent.frame, accent.rotation.to_rotation()));

        sequence.key_channel(&limb.channel, phases.chain(accents));
    }

    for (joint, angles) in definition.fingers.entries() {
        let Some(channel) = binding.channel(&joint) else {
            tracing::debug!("{}: {joint} is not bound to a channel", definition.name);
            continue;
        };
        if !is_available(channel) {
            tracing::debug!("{}: no channel {channel:?} for {joint}, skipping", definition.name);
            continue;
        }

        let target = angles.to_rotation();
        sequence.key_channel(
            channel,
            timeline.keys().iter().map(|key| {
                let rotation = match key.phase {
                    PosePhase::Rest | PosePhase::Return => Rotation::ZERO,
                    PosePhase::Extended | PosePhase::Held => target,
                };
                (key.frame, rotation)
            }),
        );
    }

    sequence
}

/// Clears the armature, sequences against the backend's channels and writes
/// every key with set-then-insert.
///
/// A missing armature is fatal; missing channels are skipped.
pub fn write_gesture<B: AnimationBackend + ?Sized>(
    definition: &GestureDefinition,
    backend: &mut B,
) -> handsign_core::Result<PoseSequence> {
    let armature = definition.armature.as_str();
    backend.clear_animation(armature)?;

    let sequence = sequence(definition, |channel| backend.channel_exists(armature, channel));

    let timeline = definition.timeline();
    backend.set_frame_range(timeline.start(), timeline.end())?;

    for (channel, keys) in sequence.channels.iter() {
        for (frame, rotation) in keys {
            backend.set_rotation(armature, channel, *rotation)?;
            backend.insert_keyframe(armature, channel, *frame)?;
        }
    }

    tracing::debug!(
        "{}: wrote {} keys on {} channels",
        definition.name,
        sequence.len(),
        sequence.channel_count()
    );

    Ok(sequence)
}

/// [`write_gesture`], then render the clip to `output`.
///
/// The definition's own background wins over `background`.
pub fn render_gesture<B: AnimationBackend + ?Sized>(
    definition: &GestureDefinition,
    backend: &mut B,
    output: &Path,
    format: RenderFormat,
    background: Option<&Path>,
) -> handsign_core::Result<PoseSequence> {
    let sequence = write_gesture(definition, backend)?;

    if let Some(background) = definition.background.as_deref().or(background) {
        backend.set_background_image(background)?;
    }

    backend.render_animation(output, format)?;
    tracing::info!("{}: rendered {}", definition.name, output.display());

    Ok(sequence)
}
