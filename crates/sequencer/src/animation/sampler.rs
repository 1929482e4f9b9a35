//! Keyframe sampling and interpolation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{
    data::Animatable,
    error::{HandsignAnimationError, Result},
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    Constant,
}

/// Keyframe sampler. Times are frames, strictly increasing.
///
/// Outside the keyed range the nearest key holds.
#[derive(Debug, Clone)]
pub enum AnimationSampler<T> {
    Linear { times: Vec<f64>, values: Vec<T> },
    Constant { times: Vec<f64>, values: Vec<T> },
}

impl<T: Animatable> AnimationSampler<T> {
    pub fn new(interpolation: Interpolation, times: Vec<f64>, values: Vec<T>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(HandsignAnimationError::Mismatch {
                times: times.len(),
                values: values.len(),
            });
        }

        Ok(match interpolation {
            Interpolation::Linear => Self::Linear { times, values },
            Interpolation::Constant => Self::Constant { times, values },
        })
    }

    pub fn times(&self) -> &[f64] {
        match self {
            Self::Linear { times, .. } => times,
            Self::Constant { times, .. } => times,
        }
    }

    fn values(&self) -> &[T] {
        match self {
            Self::Linear { values, .. } => values,
            Self::Constant { values, .. } => values,
        }
    }

    /// `None` only when there are no keys at all.
    pub fn sample(&self, time: f64) -> Option<T> {
        let values = self.values();

        match self.search_bounds(time)? {
            Bounds::Exact(index) => Some(values[index].clone()),
            Bounds::Between(left, right) => match self {
                Self::Constant { .. } => Some(values[left].clone()),
                Self::Linear { times, .. } => {
                    let t = (time - times[left]) / (times[right] - times[left]);
                    Some(T::interpolate_linear(&values[left], &values[right], t))
                }
            },
        }
    }

    fn search_bounds(&self, time: f64) -> Option<Bounds> {
        let times = self.times();
        if times.is_empty() {
            return None;
        }

        Some(
            match times.binary_search_by(|t| t.partial_cmp(&time).unwrap_or(Ordering::Equal)) {
                Ok(index) => Bounds::Exact(index),
                Err(0) => Bounds::Exact(0),
                Err(index) if index >= times.len() => Bounds::Exact(times.len() - 1),
                Err(index) => Bounds::Between(index - 1, index),
            },
        )
    }
}

enum Bounds {
    Exact(usize),
    Between(usize, usize),
}
