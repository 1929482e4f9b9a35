use std::collections::BTreeMap;

use handsign_core::{Frame, Rotation};

use super::{
    error::Result,
    sampler::{AnimationSampler, Interpolation},
};

/// The rotation curve of one pose channel.
#[derive(Debug, Clone)]
pub struct ChannelCurve {
    pub channel: String,
    pub sampler: AnimationSampler<Rotation>,
}

impl ChannelCurve {
    pub fn new(channel: impl Into<String>, sampler: AnimationSampler<Rotation>) -> Self {
        Self {
            channel: channel.into(),
            sampler,
        }
    }

    pub fn from_keys(
        channel: impl Into<String>,
        keys: &BTreeMap<Frame, Rotation>,
        interpolation: Interpolation,
    ) -> Result<Self> {
        let times = keys.keys().map(|frame| f64::from(*frame)).collect();
        let values = keys.values().copied().collect();
        Ok(Self::new(
            channel,
            AnimationSampler::new(interpolation, times, values)?,
        ))
    }

    /// First and last keyed frame.
    pub fn range(&self) -> Option<(f64, f64)> {
        let times = self.sampler.times();
        Some((*times.first()?, *times.last()?))
    }

    pub fn sample(&self, frame: f64) -> Option<Rotation> {
        self.sampler.sample(frame)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_curve_from_keys() {
        let target = Rotation::from_degrees(10.0, 20.0, 30.0);
        let keys = BTreeMap::from([
            (90, Rotation::ZERO),
            (1, Rotation::ZERO),
            (60, target),
            (20, target),
        ]);

        let curve = ChannelCurve::from_keys("right_index1", &keys, Interpolation::Linear).unwrap();
        assert_eq!(curve.range(), Some((1.0, 90.0)));
        assert_eq!(curve.sample(40.0), Some(target));
        assert!(curve
            .sample(10.5)
            .unwrap()
            .abs_diff_eq(target.lerp(Rotation::ZERO, 0.5), 1e-12));
    }
}
