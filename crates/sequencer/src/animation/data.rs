use handsign_core::Rotation;

/// A value that can be blended between two keyframes.
pub trait Animatable: Clone {
    fn interpolate_linear(first: &Self, second: &Self, t: f64) -> Self;
}

impl Animatable for Rotation {
    fn interpolate_linear(first: &Self, second: &Self, t: f64) -> Self {
        first.lerp(*second, t)
    }
}

impl Animatable for f64 {
    fn interpolate_linear(first: &Self, second: &Self, t: f64) -> Self {
        first + t * (second - first)
    }
}
