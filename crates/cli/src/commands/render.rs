use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use handsign::{backend::BlenderBackend, core::RenderFormat, render_gesture};

use super::{BlenderArgs, GestureArgs};
use crate::config::Config;

/// Render one gesture to a video clip with Blender.
#[derive(Debug, Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub gesture: GestureArgs,

    /// Output file; defaults to `<out_dir>/<id>.mp4`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub blender: BlenderArgs,
}

impl RenderCommand {
    pub fn run(self, mut config: Config) -> Result<()> {
        self.blender.apply(&mut config);
        let (id, definition) = self.gesture.resolve(&config)?;

        let format = RenderFormat::default();
        let output = self
            .output
            .unwrap_or_else(|| config.out_dir.join(definition.output_name(&id, format)));

        let skeleton = config.skeleton(&definition.armature)?;
        let mut backend = BlenderBackend::new(config.blender.clone(), skeleton);
        let sequence = render_gesture(
            &definition,
            &mut backend,
            &output,
            format,
            config.background.as_deref(),
        )
        .with_context(|| format!("rendering {id}"))?;

        tracing::debug!(
            "{id}: {} keys on {} channels -> {}",
            sequence.len(),
            sequence.channel_count(),
            output.display()
        );
        Ok(())
    }
}
