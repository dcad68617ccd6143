use twopoint_linalg::{vector, Matrix};

use crate::{CalibError, FocalEstimate};

/// Camera position in world coordinates, with the origin point at the world
/// origin.
///
/// The origin is back-projected along its ray to `distance`, rotated into
/// world space with `camera_to_world` and negated.
///
/// # Errors
///
/// - [`CalibError::InvalidDistance`] for a non-finite or non-positive distance.
/// - [`CalibError::Linalg`] if `camera_to_world` is not 3x3.
pub fn estimate_location(
    origin: [f64; 2],
    distance: f64,
    focal: &FocalEstimate,
    camera_to_world: &Matrix,
) -> Result<[f64; 3], CalibError> {
    if !distance.is_finite() || distance <= 0.0 {
        return Err(CalibError::InvalidDistance(distance));
    }

    let origin_cam = vector::scale(&focal.ray_direction(origin)?, distance);
    let origin_world = camera_to_world.mul_vec(&origin_cam)?;
    let location = vector::to_array3(&vector::scale(&origin_world, -1.0));
    log::debug!("camera location: {:?}", location);
    Ok(location)
}
