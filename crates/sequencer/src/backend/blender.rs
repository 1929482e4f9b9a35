//! Drives Blender in background mode.
//!
//! Keyframes are collected in memory and rendered into a Python driver
//! script, which Blender runs against the scene file:
//! `blender -b <scene> --python-exit-code 1 -P <script> -- <output>`.
//!
//! Channel availability comes from a [`Skeleton`]; the script also skips any
//! bone the scene's armature lacks.

use std::{
    collections::BTreeMap,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use askama::Template;
use handsign_core::{AnimationBackend, Frame, HandsignCoreError, RenderFormat, Rotation};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{process::run_blocking, skeleton::Skeleton};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RenderEngine {
    #[default]
    #[strum(to_string = "BLENDER_EEVEE_NEXT", serialize = "eevee")]
    Eevee,
    #[strum(to_string = "CYCLES", serialize = "cycles")]
    Cycles,
    #[strum(to_string = "BLENDER_WORKBENCH", serialize = "workbench")]
    Workbench,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlenderSettings {
    pub executable: String,
    pub scene: PathBuf,
    pub engine: RenderEngine,
    /// Where driver scripts are written. Defaults to a `handsign` temp dir.
    pub script_dir: Option<PathBuf>,
    pub keep_scripts: bool,
}

impl Default for BlenderSettings {
    fn default() -> Self {
        Self {
            executable: "blender".to_string(),
            scene: PathBuf::from("final_hello.blend"),
            engine: RenderEngine::default(),
            script_dir: None,
            keep_scripts: false,
        }
    }
}

#[derive(Debug)]
pub struct BlenderBackend {
    settings: BlenderSettings,
    skeleton: Skeleton,
    current: IndexMap<String, Rotation>,
    keys: IndexMap<String, BTreeMap<Frame, Rotation>>,
    frame_range: Option<(Frame, Frame)>,
    background: Option<PathBuf>,
}

impl BlenderBackend {
    /// `skeleton` stands in for the scene's armature when answering
    /// [`AnimationBackend::channel_exists`].
    pub fn new(settings: BlenderSettings, skeleton: Skeleton) -> Self {
        Self {
            settings,
            skeleton,
            current: IndexMap::new(),
            keys: IndexMap::new(),
            frame_range: None,
            background: None,
        }
    }

    pub fn settings(&self) -> &BlenderSettings {
        &self.settings
    }

    pub fn script(&self, output: &Path, format: RenderFormat) -> Result<String, askama::Error> {
        PoseScriptTemplate::new(self, output, format).render()
    }

    fn script_path(&self, output: &Path) -> PathBuf {
        let dir = self
            .settings
            .script_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("handsign"));
        let stem = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "gesture".to_string());
        dir.join(format!("{stem}.py"))
    }

    fn armature_check(&self, object: &str) -> handsign_core::Result<()> {
        if object == self.skeleton.armature {
            Ok(())
        } else {
            Err(HandsignCoreError::MissingObject(object.to_string()))
        }
    }
}

impl AnimationBackend for BlenderBackend {
    fn clear_animation(&mut self, object: &str) -> handsign_core::Result<()> {
        self.armature_check(object)?;
        self.current.clear();
        self.keys.clear();
        Ok(())
    }

    fn channel_exists(&self, object: &str, channel: &str) -> bool {
        object == self.skeleton.armature && self.skeleton.contains(channel)
    }

    fn set_rotation(
        &mut self,
        object: &str,
        channel: &str,
        rotation: Rotation,
    ) -> handsign_core::Result<()> {
        self.armature_check(object)?;
        if !self.skeleton.contains(channel) {
            return Err(HandsignCoreError::missing_channel(object, channel));
        }
        self.current.insert(channel.to_string(), rotation);
        Ok(())
    }

    fn insert_keyframe(&mut self, object: &str, channel: &str, frame: Frame) -> handsign_core::Result<()> {
        self.armature_check(object)?;
        if !self.skeleton.contains(channel) {
            return Err(HandsignCoreError::missing_channel(object, channel));
        }
        let rotation = self.current.get(channel).copied().unwrap_or_default();
        self.keys
            .entry(channel.to_string())
            .or_default()
            .insert(frame, rotation);
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
        if !path.is_file() {
            return Err(HandsignCoreError::MissingBackground(path.to_path_buf()));
        }
        self.background = Some(path.to_path_buf());
        Ok(())
    }

    fn render_animation(&mut self, output: &Path, format: RenderFormat) -> handsign_core::Result<()> {
        let script = self
            .script(output, format)
            .map_err(|err| HandsignCoreError::Backend(format!("driver script: {err}")))?;

        let script_path = self.script_path(output);
        if let Some(dir) = script_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        if let Some(dir) = output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&script_path, script)?;
        tracing::debug!("wrote driver script {}", script_path.display());

        let result = run_blocking(
            &self.settings.executable,
            [
                OsStr::new("-b"),
                self.settings.scene.as_os_str(),
                // a Python exception in the script fails the render
                OsStr::new("--python-exit-code"),
                OsStr::new("1"),
                OsStr::new("-P"),
                script_path.as_os_str(),
                OsStr::new("--"),
                output.as_os_str(),
            ],
        );

        if !self.settings.keep_scripts {
            if let Err(err) = std::fs::remove_file(&script_path) {
                tracing::warn!("could not remove {}: {err}", script_path.display());
            }
        }

        result
    }
}

struct ScriptKey {
    channel: String,
    frame: Frame,
    rotation: String,
}

#[derive(Template)]
#[template(path = "blender/pose.py", escape = "none")]
struct PoseScriptTemplate {
    gesture: String,
    output: String,
    armature: String,
    frame_start: Frame,
    frame_end: Frame,
    keys: Vec<ScriptKey>,
    background: Option<String>,
    engine: String,
    container: String,
    codec: String,
}

impl PoseScriptTemplate {
    fn new(backend: &BlenderBackend, output: &Path, format: RenderFormat) -> Self {
        let (frame_start, frame_end) = backend.frame_range.unwrap_or_else(|| {
            let frames: Vec<Frame> = backend
                .keys
                .values()
                .flat_map(|keys| keys.keys().copied())
                .collect();
            let start = frames.iter().copied().min().unwrap_or(1);
            (start, frames.iter().copied().max().unwrap_or(start))
        });

        let keys = backend
            .keys
            .iter()
            .flat_map(|(channel, keys)| {
                keys.iter().map(move |(frame, rotation)| ScriptKey {
                    channel: py_str(channel),
                    frame: *frame,
                    rotation: py_tuple(*rotation),
                })
            })
            .collect();

        let gesture = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            gesture: py_str(&gesture),
            output: py_str(&output.to_string_lossy()),
            armature: py_str(&backend.skeleton.armature),
            frame_start,
            frame_end,
            keys,
            background: backend
                .background
                .as_ref()
                .map(|path| py_str(&path.to_string_lossy())),
            engine: py_str(&backend.settings.engine.to_string()),
            container: py_str(&format.container.to_string()),
            codec: py_str(&format.codec.to_string()),
        }
    }
}

// JSON string literals are valid Python string literals
fn py_str(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn py_tuple(rotation: Rotation) -> String {
    let [x, y, z] = rotation.to_array();
    format!("({x:?}, {y:?}, {z:?})")
}
