use serde::{Deserialize, Serialize};
use twopoint_linalg::Matrix;

use crate::focal::validate_sensor_length;
use crate::{
    estimate_focal, estimate_location, extract_euler, vanishing_points, CalibError,
    CalibrationInput, EulerAngles, FocalEstimate, WorldTransform,
};

/// Camera orientation, and position when a distance was supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Rotation taking world-space vectors to camera space.
    pub world_transform: Matrix,
    /// Rotation taking camera-space vectors to world space.
    pub camera_rotation: Matrix,
    /// Angles of `camera_rotation`.
    pub euler: EulerAngles,
    /// Camera position in world coordinates.
    pub location: Option<[f64; 3]>,
}

/// Everything recovered from one [`CalibrationInput`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationResult {
    /// Vanishing points of edge families 0 and 1, in UV units.
    pub vanishing_points: [[f64; 2]; 2],
    /// Focal length and field of view.
    pub focal: Option<FocalEstimate>,
    /// Camera pose, present when the focal length and axis assignment allow it.
    pub pose: Option<CameraPose>,
    /// Reasons for every output left empty above.
    pub withheld: Vec<CalibError>,
}

impl CalibrationResult {
    fn withhold(&mut self, err: CalibError) {
        log::warn!("{err}");
        self.withheld.push(err);
    }
}

/// Run the whole two-point calibration.
///
/// Vanishing points are always computed. The focal length needs a positive
/// radicand; the pose additionally needs two distinct axes, and the location
/// an origin distance. Any output that cannot be computed is left empty and
/// its cause is pushed to [`CalibrationResult::withheld`].
///
/// # Errors
///
/// - [`CalibError::InvalidSensorLength`] for a non-positive sensor length.
/// - [`CalibError::SingularGeometry`] when a vanishing point is at infinity.
pub fn calibrate(input: &CalibrationInput) -> Result<CalibrationResult, CalibError> {
    validate_sensor_length(input.sensor_length)?;

    let mut result = CalibrationResult {
        vanishing_points: vanishing_points(&input.corners)?,
        focal: None,
        pose: None,
        withheld: Vec::new(),
    };

    let focal = match estimate_focal(&result.vanishing_points, input.sensor_length) {
        Ok(focal) => focal,
        Err(err) => {
            result.withhold(err);
            return Ok(result);
        }
    };
    result.focal = Some(focal);

    if let Err(err) = input.axes.validate() {
        result.withhold(err);
        return Ok(result);
    }

    let transform = WorldTransform::from_vanishing_points(
        &result.vanishing_points,
        &input.axes,
        &focal,
    )?;
    let camera_rotation = transform.camera_to_world()?;
    let euler = extract_euler(&camera_rotation)?;

    let location = match input.origin_distance {
        Some(distance) => {
            match estimate_location(input.origin_point(), distance, &focal, &camera_rotation) {
                Ok(location) => Some(location),
                Err(err) => {
                    result.withhold(err);
                    None
                }
            }
        }
        None => {
            result.withhold(CalibError::MissingDistance);
            None
        }
    };

    result.pose = Some(CameraPose {
        world_transform: transform.world_to_camera(),
        camera_rotation,
        euler,
        location,
    });
    Ok(result)
}
