//! Renders a run of gestures, one blocking backend invocation at a time.
//!
//! A missing definition is skipped with a warning. The first render failure
//! stops the batch; later identifiers are not attempted.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use handsign_core::{AnimationBackend, HandsignCoreError, RenderFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    gesture::{GestureDefinition, GestureSource, HandsignGestureError},
    sequencer::render_gesture,
};

pub type Result<T> = std::result::Result<T, HandsignBatchError>;

#[derive(Error, Debug)]
pub enum HandsignBatchError {
    #[error("[batch] invalid letter range {0:?}, expected e.g. \"a-z\"")]
    InvalidRange(String),

    #[error("[batch] {id}: {source}")]
    Source {
        id: String,
        #[source]
        source: HandsignGestureError,
    },

    #[error("[batch] {id}: render failed: {source}")]
    Render {
        id: String,
        #[source]
        source: HandsignCoreError,
    },
}

/// An inclusive run of lowercase letters, written `a-z` (or a single `c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LetterRange {
    start: char,
    end: char,
}

impl LetterRange {
    pub const ALPHABET: Self = Self {
        start: 'a',
        end: 'z',
    };

    pub fn new(start: char, end: char) -> Result<Self> {
        let valid = |c: char| c.is_ascii_lowercase();
        if !valid(start) || !valid(end) || start > end {
            return Err(HandsignBatchError::InvalidRange(format!("{start}-{end}")));
        }
        Ok(Self { start, end })
    }

    pub fn ids(&self) -> Vec<String> {
        (self.start..=self.end).map(String::from).collect()
    }
}

impl Default for LetterRange {
    fn default() -> Self {
        Self::ALPHABET
    }
}

impl fmt::Display for LetterRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for LetterRange {
    type Err = HandsignBatchError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || HandsignBatchError::InvalidRange(s.to_string());
        let single = |part: &str| {
            let mut chars = part.trim().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(c),
                _ => Err(invalid()),
            }
        };

        let (start, end) = match s.split_once('-') {
            Some((start, end)) => (single(start)?, single(end)?),
            None => {
                let c = single(s)?;
                (c, c)
            }
        };
        Self::new(start, end).map_err(|_| invalid())
    }
}

impl TryFrom<String> for LetterRange {
    type Error = HandsignBatchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LetterRange> for String {
    fn from(range: LetterRange) -> Self {
        range.to_string()
    }
}

/// Renders one gesture to `output`, blocking until it is done.
pub trait GestureRunner {
    fn run(
        &mut self,
        id: &str,
        definition: &GestureDefinition,
        output: &Path,
    ) -> handsign_core::Result<()>;
}

impl<F> GestureRunner for F
where
    F: FnMut(&str, &GestureDefinition, &Path) -> handsign_core::Result<()>,
{
    fn run(
        &mut self,
        id: &str,
        definition: &GestureDefinition,
        output: &Path,
    ) -> handsign_core::Result<()> {
        self(id, definition, output)
    }
}

/// Builds a fresh backend per gesture and renders through it.
pub struct BackendRunner<F> {
    make_backend: F,
    format: RenderFormat,
    background: Option<PathBuf>,
}

impl<F, B> BackendRunner<F>
where
    F: FnMut() -> B,
    B: AnimationBackend,
{
    pub fn new(make_backend: F) -> Self {
        Self {
            make_backend,
            format: RenderFormat::default(),
            background: None,
        }
    }

    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_background(mut self, background: Option<PathBuf>) -> Self {
        self.background = background;
        self
    }
}

impl<F, B> GestureRunner for BackendRunner<F>
where
    F: FnMut() -> B,
    B: AnimationBackend,
{
    fn run(
        &mut self,
        _id: &str,
        definition: &GestureDefinition,
        output: &Path,
    ) -> handsign_core::Result<()> {
        let mut backend = (self.make_backend)();
        render_gesture(
            definition,
            &mut backend,
            output,
            self.format,
            self.background.as_deref(),
        )
        .map(|_| ())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub rendered: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

pub struct BatchDriver<S> {
    source: S,
    output_dir: PathBuf,
    format: RenderFormat,
}

impl<S: GestureSource> BatchDriver<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            format: RenderFormat::default(),
        }
    }

    pub fn with_format(mut self, format: RenderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn run<I>(&self, ids: I, runner: &mut impl GestureRunner) -> Result<BatchReport>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for id in ids {
            let id = id.as_ref();
            let definition = self
                .source
                .find(id)
                .map_err(|source| HandsignBatchError::Source {
                    id: id.to_string(),
                    source,
                })?;

            let Some(definition) = definition else {
                tracing::warn!("no gesture definition for {id:?}, skipping");
                report.skipped.push(id.to_string());
                continue;
            };

            let output = self.output_dir.join(definition.output_name(id, self.format));
            tracing::info!("{id}: rendering {}", output.display());
            runner
                .run(id, &definition, &output)
                .map_err(|source| HandsignBatchError::Render {
                    id: id.to_string(),
                    source,
                })?;

            report.rendered.push(output);
        }

        Ok(report)
    }
}
