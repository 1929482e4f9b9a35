use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use handsign::spell::{normalize_text, ClipConcat};

use crate::config::Config;

/// Join per-letter clips into one fingerspelled video with ffmpeg.
#[derive(Debug, Args)]
pub struct SpellCommand {
    /// Text to spell; anything but letters is dropped
    pub text: String,

    /// Directory of `<letter>.mp4` clips; defaults to the output directory
    #[arg(long)]
    pub clips: Option<PathBuf>,

    /// Output file; defaults to `<text>.mp4`
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Playback speed of the joined clip, 0.5 to 100
    #[arg(long, default_value_t = 2.0)]
    pub speed: f64,

    /// ffmpeg executable
    #[arg(long)]
    pub ffmpeg: Option<String>,
}

impl SpellCommand {
    pub fn run(self, config: Config) -> Result<()> {
        let clips = self.clips.unwrap_or_else(|| config.out_dir.clone());
        let output = self
            .output
            .unwrap_or_else(|| PathBuf::from(format!("{}.mp4", normalize_text(&self.text))));

        let concat = ClipConcat::new(clips)
            .with_ffmpeg(self.ffmpeg.unwrap_or(config.ffmpeg))
            .with_speed(self.speed)?;

        concat
            .run(&self.text, &output)
            .with_context(|| format!("spelling {:?}", self.text))?;
        println!("{}", output.display());
        Ok(())
    }
}
