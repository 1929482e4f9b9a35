mod curve;
mod data;
mod error;
mod sampler;

pub use curve::ChannelCurve;
pub use data::Animatable;
pub use error::{HandsignAnimationError, Result};
pub use sampler::{AnimationSampler, Interpolation};
