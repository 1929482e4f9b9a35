use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use handsign::{
    backend::BlenderBackend,
    batch::{BatchDriver, LetterRange},
    core::RenderFormat,
    gesture::{GestureDefinition, DEFAULT_ARMATURE},
    render_gesture, Skeleton,
};

use super::BlenderArgs;
use crate::config::Config;

/// Render every gesture in a letter range, one Blender run at a time.
#[derive(Debug, Args)]
pub struct BatchCommand {
    /// Explicit identifiers; overrides `--letters`
    pub ids: Vec<String>,

    /// Letter range, e.g. `a-z` or `c-f`
    #[arg(long)]
    pub letters: Option<LetterRange>,

    /// Directory the clips are written to
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[command(flatten)]
    pub blender: BlenderArgs,
}

impl BatchCommand {
    pub fn run(self, mut config: Config) -> Result<()> {
        self.blender.apply(&mut config);
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }

        let ids = if self.ids.is_empty() {
            self.letters.unwrap_or(config.letters).ids()
        } else {
            self.ids
        };

        std::fs::create_dir_all(&config.out_dir)
            .with_context(|| format!("creating {}", config.out_dir.display()))?;

        // a configured skeleton file applies to every armature
        let loaded = match &config.skeleton {
            Some(_) => Some(config.skeleton(DEFAULT_ARMATURE)?),
            None => None,
        };

        let driver = BatchDriver::new(config.gesture_source(), &config.out_dir);
        let report = driver.run(&ids, &mut |_: &str, definition: &GestureDefinition, output: &Path| {
            let definition = config.prepare(definition.clone());
            let skeleton = loaded
                .clone()
                .unwrap_or_else(|| Skeleton::smplx(&definition.armature));
            let mut backend = BlenderBackend::new(config.blender.clone(), skeleton);
            render_gesture(
                &definition,
                &mut backend,
                output,
                RenderFormat::default(),
                config.background.as_deref(),
            )
            .map(|_| ())
        })?;

        tracing::info!(
            "batch done: {} rendered, {} skipped{}",
            report.rendered.len(),
            report.skipped.len(),
            if report.skipped.is_empty() {
                String::new()
            } else {
                format!(" ({})", report.skipped.join(", "))
            }
        );
        Ok(())
    }
}
