//! XYZ Euler rotations.
//!
//! Gesture data is authored in degrees, host applications consume radians.
//! [`EulerAngles`] is the authored form, [`Rotation`] the backend form.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// An XYZ Euler rotation in radians, as written into a pose channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rotation(pub DVec3);

impl Rotation {
    pub const ZERO: Self = Self(DVec3::ZERO);

    pub fn from_radians(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    pub fn from_degrees(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(
            degrees_to_radians(x),
            degrees_to_radians(y),
            degrees_to_radians(z),
        ))
    }

    pub fn to_degrees(self) -> DVec3 {
        DVec3::new(
            radians_to_degrees(self.0.x),
            radians_to_degrees(self.0.y),
            radians_to_degrees(self.0.z),
        )
    }

    pub fn to_array(self) -> [f64; 3] {
        self.0.to_array()
    }

    pub fn is_zero(self) -> bool {
        self.0 == DVec3::ZERO
    }

    /// Component-wise blend, the way Euler curves are evaluated per axis.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self(self.0.lerp(other.0, t))
    }

    pub fn abs_diff_eq(self, other: Self, max_abs_diff: f64) -> bool {
        self.0.abs_diff_eq(other.0, max_abs_diff)
    }
}

impl From<[f64; 3]> for Rotation {
    fn from(radians: [f64; 3]) -> Self {
        Self(DVec3::from_array(radians))
    }
}

/// A single authored angle component.
///
/// Plain numbers are degrees. `{"rad": 0.2}` keeps a value that was
/// authored directly in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Angle {
    Degrees(f64),
    Radians { rad: f64 },
}

impl Angle {
    pub fn radians(self) -> f64 {
        match self {
            Angle::Degrees(degrees) => degrees_to_radians(degrees),
            Angle::Radians { rad } => rad,
        }
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::Degrees(0.0)
    }
}

/// An authored XYZ triple, serialized as a three element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EulerAngles(pub [Angle; 3]);

impl EulerAngles {
    pub const ZERO: Self = Self([Angle::Degrees(0.0); 3]);

    pub fn degrees(x: f64, y: f64, z: f64) -> Self {
        Self([Angle::Degrees(x), Angle::Degrees(y), Angle::Degrees(z)])
    }

    pub fn radians(x: f64, y: f64, z: f64) -> Self {
        Self([
            Angle::Radians { rad: x },
            Angle::Radians { rad: y },
            Angle::Radians { rad: z },
        ])
    }

    pub fn to_rotation(self) -> Rotation {
        let [x, y, z] = self.0;
        Rotation::from_radians(x.radians(), y.radians(), z.radians())
    }
}

impl From<EulerAngles> for Rotation {
    fn from(angles: EulerAngles) -> Self {
        angles.to_rotation()
    }
}

#[cfg(test)]
mod test {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_right_angle_round_trip() {
        let radians = degrees_to_radians(90.0);
        assert!((radians - FRAC_PI_2).abs() < 1e-15);
        assert!((radians_to_degrees(radians) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_authored_values() {
        for degrees in [-136.497, -39.231, 0.0, 0.000096, 22.404, 388.436] {
            let back = radians_to_degrees(degrees_to_radians(degrees));
            assert!(
                (back - degrees).abs() <= 1e-12 * degrees.abs().max(1.0),
                "{degrees} came back as {back}"
            );
        }
    }

    #[test]
    fn test_from_degrees_matches_scalar_conversion() {
        let rotation = Rotation::from_degrees(10.0, 20.0, 30.0);
        assert_eq!(
            rotation.to_array(),
            [
                degrees_to_radians(10.0),
                degrees_to_radians(20.0),
                degrees_to_radians(30.0)
            ]
        );
        assert!(rotation.abs_diff_eq(Rotation::from_radians(0.1745, 0.3491, 0.5236), 1e-4));
    }

    #[test]
    fn test_mixed_units() {
        // shoulder raise as authored: (0, 90 degrees, 0.2 radians)
        let angles = EulerAngles([
            Angle::Degrees(0.0),
            Angle::Degrees(90.0),
            Angle::Radians { rad: 0.2 },
        ]);
        assert_eq!(
            angles.to_rotation().to_array(),
            [0.0, degrees_to_radians(90.0), 0.2]
        );
    }

    #[test]
    fn test_angles_json() {
        let angles: EulerAngles = serde_json::from_str(r#"[0, 90, {"rad": -2}]"#).unwrap();
        assert_eq!(
            angles,
            EulerAngles([
                Angle::Degrees(0.0),
                Angle::Degrees(90.0),
                Angle::Radians { rad: -2.0 },
            ])
        );

        let json = serde_json::to_string(&EulerAngles::degrees(1.5, 0.0, -3.0)).unwrap();
        assert_eq!(json, "[1.5,0.0,-3.0]");
    }

    #[test]
    fn test_lerp_is_per_axis() {
        let a = Rotation::ZERO;
        let b = Rotation::from_radians(1.0, -2.0, 4.0);
        assert_eq!(a.lerp(b, 0.5), Rotation::from_radians(0.5, -1.0, 2.0));
    }
}
