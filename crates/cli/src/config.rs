use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use handsign::{
    backend::BlenderSettings,
    batch::LetterRange,
    gesture::{BuiltinGestures, GestureDefinition, GestureDirectory, GestureSource},
    Skeleton,
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "handsign.json";
pub const BLENDER_ENV: &str = "HANDSIGN_BLENDER";
pub const FFMPEG_ENV: &str = "HANDSIGN_FFMPEG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub blender: BlenderSettings,
    pub ffmpeg: String,
    /// Replaces the armature every definition names.
    pub armature: Option<String>,
    /// JSON skeleton description; the SMPL-X joint list when unset.
    pub skeleton: Option<PathBuf>,
    pub background: Option<PathBuf>,
    /// Directory of `<id>.json` definitions; the built-in library when unset.
    pub gestures: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub letters: LetterRange,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blender: BlenderSettings::default(),
            ffmpeg: "ffmpeg".to_string(),
            armature: None,
            skeleton: None,
            background: None,
            gestures: None,
            out_dir: PathBuf::from("clips"),
            letters: LetterRange::default(),
        }
    }
}

impl Config {
    /// An explicit path must exist. Without one, `handsign.json` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).is_file() => Self::from_file(Path::new(CONFIG_FILE))?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!("loaded config {}", path.display());
        Ok(config)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(blender) = var(BLENDER_ENV).filter(|value| !value.is_empty()) {
            self.blender.executable = blender;
        }
        if let Some(ffmpeg) = var(FFMPEG_ENV).filter(|value| !value.is_empty()) {
            self.ffmpeg = ffmpeg;
        }
    }

    pub fn prepare(&self, mut definition: GestureDefinition) -> GestureDefinition {
        if let Some(armature) = &self.armature {
            definition.armature = armature.clone();
        }
        definition
    }

    /// The channels available on `armature`.
    pub fn skeleton(&self, armature: &str) -> Result<Skeleton> {
        match &self.skeleton {
            Some(path) => Skeleton::load(path)
                .with_context(|| format!("loading skeleton {}", path.display())),
            None => Ok(Skeleton::smplx(armature)),
        }
    }

    pub fn gesture_source(&self) -> Box<dyn GestureSource> {
        match &self.gestures {
            Some(dir) => Box::new(GestureDirectory::new(dir)),
            None => Box::new(BuiltinGestures),
        }
    }
}
