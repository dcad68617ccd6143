use serde::{Deserialize, Serialize};
use twopoint_linalg::vector;

use crate::CalibError;

/// Focal length recovered from two orthogonal vanishing directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocalEstimate {
    /// Focal length, in the units of `sensor_length`.
    pub focal_length: f64,
    /// Field of view across the longer sensor side, in radians.
    pub field_of_view: f64,
    /// Longer physical side of the sensor.
    pub sensor_length: f64,
}

impl FocalEstimate {
    /// Field of view in degrees.
    pub fn field_of_view_degrees(&self) -> f64 {
        self.field_of_view.to_degrees()
    }

    /// Depth of the image plane in UV units, `2 f / sensor_length`.
    pub fn image_plane_depth(&self) -> f64 {
        2.0 * self.focal_length / self.sensor_length
    }

    /// Unit camera-space direction of the ray through a UV point.
    ///
    /// The camera looks down `-z` with `x` right and `y` up.
    pub fn ray_direction(&self, uv: [f64; 2]) -> Result<[f64; 3], CalibError> {
        let ray = vector::normalize(&[uv[0], uv[1], -self.image_plane_depth()])?;
        Ok(vector::to_array3(&ray))
    }
}

/// Check that a sensor length is usable.
pub(crate) fn validate_sensor_length(sensor_length: f64) -> Result<(), CalibError> {
    if !sensor_length.is_finite() || sensor_length <= 0.0 {
        return Err(CalibError::InvalidSensorLength(sensor_length));
    }
    Ok(())
}

/// Field of view in radians for a focal length and a sensor side.
pub fn field_of_view(focal_length: f64, sensor_length: f64) -> f64 {
    2.0 * (sensor_length / (2.0 * focal_length)).atan()
}

/// Estimate the focal length from two vanishing points in UV units.
///
/// The rays `(x0, y0, -d)` and `(x1, y1, -d)` with `d = 2 f / sensor_length`
/// are orthogonal, hence `f = sqrt(-(x0 x1 + y0 y1)) / 2 * sensor_length`.
///
/// # Errors
///
/// - [`CalibError::InvalidSensorLength`] for a non-positive sensor length.
/// - [`CalibError::NoRealFocalLength`] when `-(x0 x1 + y0 y1) <= 0`.
pub fn estimate_focal(
    vanishing_points: &[[f64; 2]; 2],
    sensor_length: f64,
) -> Result<FocalEstimate, CalibError> {
    validate_sensor_length(sensor_length)?;

    let [v0, v1] = vanishing_points;
    let radicand = -vector::dot(v0, v1);
    if radicand.is_nan() || radicand <= 0.0 {
        return Err(CalibError::NoRealFocalLength { radicand });
    }

    let focal_length = radicand.sqrt() / 2.0 * sensor_length;
    let estimate = FocalEstimate {
        focal_length,
        field_of_view: field_of_view(focal_length, sensor_length),
        sensor_length,
    };
    log::debug!(
        "focal length {:.4} (fov {:.2} deg)",
        estimate.focal_length,
        estimate.field_of_view_degrees()
    );
    Ok(estimate)
}
