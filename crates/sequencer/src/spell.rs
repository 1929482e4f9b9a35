//! Spells a word by concatenating per-letter clips with ffmpeg.

use std::path::{Path, PathBuf};

use handsign_core::HandsignCoreError;
use thiserror::Error;

use crate::process::run_blocking;

pub type Result<T> = std::result::Result<T, HandsignSpellError>;

/// Speeds ffmpeg's `atempo` filter accepts.
pub const SPEED_RANGE: std::ops::RangeInclusive<f64> = 0.5..=100.0;

#[derive(Error, Debug)]
pub enum HandsignSpellError {
    #[error("[spell] no letters in {0:?}")]
    EmptyText(String),

    #[error("[spell] no clip for {letter:?} at {}", .path.display())]
    MissingClip { letter: char, path: PathBuf },

    #[error("[spell] could not write concat list {}: {source}", .path.display())]
    WriteList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[spell] speed {0} is outside {min}..={max}", min = SPEED_RANGE.start(), max = SPEED_RANGE.end())]
    InvalidSpeed(f64),

    #[error("[spell] {0}")]
    Ffmpeg(#[from] HandsignCoreError),
}

/// Lowercases and keeps only `a`..=`z`.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

#[derive(Debug, Clone)]
pub struct ClipConcat {
    clips_dir: PathBuf,
    ffmpeg: String,
    speed: f64,
}

impl ClipConcat {
    pub fn new(clips_dir: impl Into<PathBuf>) -> Self {
        Self {
            clips_dir: clips_dir.into(),
            ffmpeg: "ffmpeg".to_string(),
            speed: 2.0,
        }
    }

    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<String>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    /// Playback speed of the joined clip, within [`SPEED_RANGE`].
    pub fn with_speed(mut self, speed: f64) -> Result<Self> {
        if !SPEED_RANGE.contains(&speed) {
            return Err(HandsignSpellError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(self)
    }

    pub fn clip_path(&self, letter: char) -> PathBuf {
        self.clips_dir.join(format!("{letter}.mp4"))
    }

    /// The clip for every letter of `text`, in order.
    pub fn plan(&self, text: &str) -> Result<Vec<PathBuf>> {
        let letters = normalize_text(text);
        if letters.is_empty() {
            return Err(HandsignSpellError::EmptyText(text.to_string()));
        }

        letters
            .chars()
            .map(|letter| {
                let path = self.clip_path(letter);
                if path.is_file() {
                    Ok(std::path::absolute(&path).unwrap_or(path))
                } else {
                    Err(HandsignSpellError::MissingClip { letter, path })
                }
            })
            .collect()
    }

    /// ffmpeg concat demuxer input: one `file '<path>'` line per clip.
    pub fn concat_list(clips: &[PathBuf]) -> String {
        clips
            .iter()
            .map(|clip| {
                let path = clip.to_string_lossy().replace('\'', r"'\''");
                format!("file '{path}'\n")
            })
            .collect()
    }

    pub fn args(&self, list: &Path, output: &Path) -> Vec<String> {
        let mut args: Vec<String> = ["-y", "-f", "concat", "-safe", "0", "-i"]
            .into_iter()
            .map(String::from)
            .collect();
        args.push(list.to_string_lossy().into_owned());
        args.extend([
            "-vf".to_string(),
            format!("setpts={:?}*PTS", 1.0 / self.speed),
            "-af".to_string(),
            format!("atempo={:?}", self.speed),
        ]);
        args.extend(
            ["-c:v", "libx264", "-preset", "fast", "-crf", "23", "-c:a", "aac", "-b:a", "192k"]
                .into_iter()
                .map(String::from),
        );
        args.push(output.to_string_lossy().into_owned());
        args
    }

    /// Writes the concat list next to `output`, runs ffmpeg and removes the list.
    pub fn run(&self, text: &str, output: &Path) -> Result<PathBuf> {
        let clips = self.plan(text)?;

        let list = output.with_extension("concat.txt");
        std::fs::write(&list, Self::concat_list(&clips)).map_err(|source| {
            HandsignSpellError::WriteList {
                path: list.clone(),
                source,
            }
        })?;

        tracing::info!("joining {} clips into {}", clips.len(), output.display());
        let result = run_blocking(&self.ffmpeg, self.args(&list, output));

        if let Err(err) = std::fs::remove_file(&list) {
            tracing::warn!("could not remove {}: {err}", list.display());
        }

        result?;
        Ok(output.to_path_buf())
    }
}
