use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use handsign::{backend::RenderEngine, gesture::GestureDefinition};

use crate::config::Config;

pub mod batch;
pub mod list;
pub mod preview;
pub mod render;
pub mod spell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    Json,
}

/// Picks one gesture by identifier, or loads it from a file.
#[derive(Debug, Args)]
pub struct GestureArgs {
    /// Gesture identifier, e.g. `c` or `hello`
    #[arg(required_unless_present = "file")]
    pub id: Option<String>,

    /// Load the definition from a JSON file instead of the library
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl GestureArgs {
    /// Identifier and definition, with config overrides applied.
    pub fn resolve(&self, config: &Config) -> Result<(String, GestureDefinition)> {
        let (id, definition) = match (&self.file, &self.id) {
            (Some(path), id) => {
                let definition = GestureDefinition::load(path)
                    .with_context(|| format!("loading {}", path.display()))?;
                (id.clone().unwrap_or_else(|| definition.name.clone()), definition)
            }
            (None, Some(id)) => match config.gesture_source().find(id)? {
                Some(definition) => (id.clone(), definition),
                None => bail!("no gesture definition for {id:?}"),
            },
            (None, None) => bail!("a gesture id or --file is required"),
        };
        Ok((id, config.prepare(definition)))
    }
}

/// Blender overrides shared by `render` and `batch`.
#[derive(Debug, Args)]
pub struct BlenderArgs {
    /// Blender executable
    #[arg(long)]
    pub blender: Option<String>,

    /// Scene file holding the armature
    #[arg(long)]
    pub scene: Option<PathBuf>,

    #[arg(long)]
    pub engine: Option<RenderEngine>,

    /// Background image behind the character
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Keep the generated driver scripts
    #[arg(long)]
    pub keep_scripts: bool,
}

impl BlenderArgs {
    pub fn apply(&self, config: &mut Config) {
        if let Some(blender) = &self.blender {
            config.blender.executable = blender.clone();
        }
        if let Some(scene) = &self.scene {
            config.blender.scene = scene.clone();
        }
        if let Some(engine) = self.engine {
            config.blender.engine = engine;
        }
        if let Some(background) = &self.background {
            config.background = Some(background.clone());
        }
        config.blender.keep_scripts |= self.keep_scripts;
    }
}
