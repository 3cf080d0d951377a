use derive_more::{Display, Error, From};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use test_strategy::Arbitrary;

const PAN_STEP: f32 = 15.0;
const TILT_STEP: f32 = 10.0;
const ZOOM_STEP: f32 = 0.2;

const FULL_TURN: f32 = 360.0;
const MIN_ELEVATION: f32 = 10.0;
const MAX_ELEVATION: f32 = 80.0;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 5.0;

/// One step of [`Camera`] motion.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Adjust {
    TiltUp,
    TiltDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
}

/// The pose of the camera orbiting the board.
///
/// The camera always looks at the center of the board. Its pose is given by
/// the azimuth and elevation angles in degrees and by the distance to the
/// center in board units, where the board spans `(-1..=1)` on both axes.
#[derive(Debug, Display, Copy, Clone, PartialEq, Deserialize, Serialize, Arbitrary)]
#[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
#[serde(deny_unknown_fields, default)]
pub struct Camera {
    #[strategy((0u8..24).prop_map(|n| n as f32 * PAN_STEP))]
    azimuth: f32,
    #[strategy((1u8..=8).prop_map(|n| n as f32 * TILT_STEP))]
    elevation: f32,
    #[strategy((10u8..=25).prop_map(|n| n as f32 * ZOOM_STEP))]
    distance: f32,
}

impl Camera {
    /// Constructs [`Camera`] from a pose, wrapping the azimuth around the
    /// full turn and clamping the elevation and the distance to their bounds.
    pub fn new(azimuth: f32, elevation: f32, distance: f32) -> Self {
        Camera {
            azimuth: azimuth.rem_euclid(FULL_TURN),
            elevation: elevation.clamp(MIN_ELEVATION, MAX_ELEVATION),
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
        }
    }

    /// The angle of rotation around the board, in degrees.
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// The angle above the plane of the board, in degrees.
    pub fn elevation(&self) -> f32 {
        self.elevation
    }

    /// The distance to the center of the board, in board units.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Moves the camera one step along its orbit.
    pub fn adjust(self, step: Adjust) -> Self {
        match step {
            Adjust::TiltUp => Self::new(self.azimuth, self.elevation + TILT_STEP, self.distance),
            Adjust::TiltDown => Self::new(self.azimuth, self.elevation - TILT_STEP, self.distance),
            Adjust::PanLeft => Self::new(self.azimuth - PAN_STEP, self.elevation, self.distance),
            Adjust::PanRight => Self::new(self.azimuth + PAN_STEP, self.elevation, self.distance),
            Adjust::ZoomIn => Self::new(self.azimuth, self.elevation, self.distance - ZOOM_STEP),
            Adjust::ZoomOut => Self::new(self.azimuth, self.elevation, self.distance + ZOOM_STEP),
        }
    }

    /// The position of the camera in board units.
    pub fn eye(&self) -> [f32; 3] {
        let az = self.azimuth.to_radians();
        let el = self.elevation.to_radians();

        [
            self.distance * el.cos() * az.cos(),
            self.distance * el.cos() * az.sin(),
            self.distance * el.sin(),
        ]
    }

    /// Projects a point in board units onto the view plane.
    ///
    /// Returns the screen coordinates of the point and its depth along the
    /// optical axis. The depth is positive for points in front of the camera,
    /// which includes the whole board for any reachable pose.
    pub fn project(&self, p: [f32; 3]) -> [f32; 3] {
        let eye = self.eye();
        let forward = normalize([-eye[0], -eye[1], -eye[2]]);
        let right = normalize(cross(forward, [0.0, 0.0, 1.0]));
        let up = cross(right, forward);

        let d = [p[0] - eye[0], p[1] - eye[1], p[2] - eye[2]];
        let depth = dot(d, forward);

        [dot(d, right) / depth, dot(d, up) / depth, depth]
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(45.0, 30.0, 2.4)
    }
}

/// The reason why parsing [`Camera`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse camera pose")]
pub struct ParseCameraError(ron::de::SpannedError);

impl FromStr for Camera {
    type Err = ParseCameraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Camera {
            azimuth,
            elevation,
            distance,
        } = ron::de::from_str(s)?;

        Ok(Camera::new(azimuth, elevation, distance))
    }
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let n = dot(v, v).sqrt();
    [v[0] / n, v[1] / n, v[2] / n]
}
