//! Input records of the calibration pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use twopoint_linalg::{vector, Axis};

use crate::CalibError;

/// An image-space right-angle corner whose two edges follow two world axes.
///
/// All coordinates are UV units (see [`ImageSize`]). The edge endpoints are
/// stored relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Corner vertex.
    pub anchor: [f64; 2],
    /// First edge endpoint, relative to `anchor`.
    pub point1: [f64; 2],
    /// Second edge endpoint, relative to `anchor`.
    pub point2: [f64; 2],
}

impl Corner {
    /// Create a corner from its anchor and two relative edge endpoints.
    pub fn new(anchor: [f64; 2], point1: [f64; 2], point2: [f64; 2]) -> Self {
        Self {
            anchor,
            point1,
            point2,
        }
    }

    /// Create a corner from absolute edge endpoints.
    pub fn from_absolute(anchor: [f64; 2], end1: [f64; 2], end2: [f64; 2]) -> Self {
        let rel = |p: [f64; 2]| [p[0] - anchor[0], p[1] - anchor[1]];
        Self::new(anchor, rel(end1), rel(end2))
    }

    /// Create a corner from absolute pixel positions in an image of `size`.
    pub fn from_pixels(size: &ImageSize, anchor: [f64; 2], end1: [f64; 2], end2: [f64; 2]) -> Self {
        Self::from_absolute(
            size.pixel_to_uv(anchor),
            size.pixel_to_uv(end1),
            size.pixel_to_uv(end2),
        )
    }

    /// Absolute position of the endpoint of edge `family` (0 or 1).
    pub fn endpoint(&self, family: usize) -> [f64; 2] {
        let offset = if family == 0 { self.point1 } else { self.point2 };
        to_array2(&vector::add(&self.anchor, &offset))
    }

    /// Direction of edge `family`: anchor minus its endpoint.
    pub fn edge_direction(&self, family: usize) -> [f64; 2] {
        to_array2(&vector::subtract(&self.anchor, &self.endpoint(family)))
    }
}

fn to_array2(v: &[f64]) -> [f64; 2] {
    [v[0], v[1]]
}

/// Sign of a world axis assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    /// Along the axis.
    Positive,
    /// Against the axis.
    Negative,
}

impl Sign {
    /// `1.0` or `-1.0`.
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// A world axis with a direction, e.g. `-y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SignedAxis {
    /// World axis.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}

impl SignedAxis {
    /// `+axis`.
    pub fn positive(axis: Axis) -> Self {
        Self {
            axis,
            sign: Sign::Positive,
        }
    }

    /// `-axis`.
    pub fn negative(axis: Axis) -> Self {
        Self {
            axis,
            sign: Sign::Negative,
        }
    }
}

impl FromStr for SignedAxis {
    type Err = CalibError;

    /// Parse `x`, `+x`, `-x` (and likewise for y and z), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        let (sign, name) = match label.as_bytes().first() {
            Some(b'-') => (Sign::Negative, &label[1..]),
            Some(b'+') => (Sign::Positive, &label[1..]),
            _ => (Sign::Positive, label.as_str()),
        };
        let axis = match name {
            "x" => Axis::X,
            "y" => Axis::Y,
            "z" => Axis::Z,
            _ => return Err(CalibError::InvalidAxisLabel(s.to_string())),
        };
        Ok(Self { axis, sign })
    }
}

impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => '+',
            Sign::Negative => '-',
        };
        let axis = match self.axis {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        };
        write!(f, "{sign}{axis}")
    }
}

impl TryFrom<String> for SignedAxis {
    type Error = CalibError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SignedAxis> for String {
    fn from(a: SignedAxis) -> Self {
        a.to_string()
    }
}

/// World axes assigned to the two vanishing points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisAssignment {
    /// Axis of the vanishing point of edge family 0.
    pub first: SignedAxis,
    /// Axis of the vanishing point of edge family 1.
    pub second: SignedAxis,
}

impl AxisAssignment {
    /// Create an assignment. It is validated when the pose is built.
    pub fn new(first: SignedAxis, second: SignedAxis) -> Self {
        Self { first, second }
    }

    /// Both assignments, in vanishing point order.
    pub fn as_array(&self) -> [SignedAxis; 2] {
        [self.first, self.second]
    }

    /// Check that the two assignments use different axes.
    ///
    /// # Errors
    ///
    /// Returns [`CalibError::AmbiguousAxisAssignment`] if they do not.
    pub fn validate(&self) -> Result<(), CalibError> {
        if self.first.axis == self.second.axis {
            return Err(CalibError::AmbiguousAxisAssignment {
                axis: self.first.axis,
            });
        }
        Ok(())
    }
}

impl Default for AxisAssignment {
    fn default() -> Self {
        Self::new(SignedAxis::positive(Axis::X), SignedAxis::positive(Axis::Y))
    }
}

/// Image dimensions in pixels, used to convert between pixels and UV units.
///
/// UV coordinates are centred on the image, grow rightwards and upwards, and
/// one unit equals half of the longer image side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ImageSize {
    /// Create a new image size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn half_long_side(&self) -> f64 {
        self.width.max(self.height) / 2.0
    }

    /// Convert a pixel position (origin top-left, y down) to UV units.
    pub fn pixel_to_uv(&self, pixel: [f64; 2]) -> [f64; 2] {
        let half = self.half_long_side();
        [
            (pixel[0] - self.width / 2.0) / half,
            (self.height / 2.0 - pixel[1]) / half,
        ]
    }

    /// Convert UV units back to a pixel position.
    pub fn uv_to_pixel(&self, uv: [f64; 2]) -> [f64; 2] {
        let half = self.half_long_side();
        [
            uv[0] * half + self.width / 2.0,
            self.height / 2.0 - uv[1] * half,
        ]
    }
}

/// Everything a calibration is computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationInput {
    /// The two reference corners.
    pub corners: [Corner; 2],
    /// World axes of the two vanishing points.
    pub axes: AxisAssignment,
    /// Longer physical side of the sensor, e.g. 36 for a full-frame camera in mm.
    pub sensor_length: f64,
    /// Image point placed at the world origin, in UV units. Defaults to the
    /// anchor of the first corner.
    #[serde(default)]
    pub origin: Option<[f64; 2]>,
    /// Real-world distance from the camera to the origin point.
    #[serde(default)]
    pub origin_distance: Option<f64>,
}

impl CalibrationInput {
    /// Create an input without origin distance.
    pub fn new(corners: [Corner; 2], axes: AxisAssignment, sensor_length: f64) -> Self {
        Self {
            corners,
            axes,
            sensor_length,
            origin: None,
            origin_distance: None,
        }
    }

    /// Set the image point placed at the world origin.
    pub fn with_origin(mut self, origin: [f64; 2]) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Set the distance between the camera and the origin point.
    pub fn with_origin_distance(mut self, distance: f64) -> Self {
        self.origin_distance = Some(distance);
        self
    }

    /// The origin point, falling back to the first corner's anchor.
    pub fn origin_point(&self) -> [f64; 2] {
        self.origin.unwrap_or(self.corners[0].anchor)
    }
}
