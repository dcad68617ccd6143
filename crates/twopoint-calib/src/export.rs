//! Pose serialisation as a scripting console snippet.

use serde::{Deserialize, Serialize};

use crate::{CalibError, CalibrationResult};

/// Formatting options for [`pose_script`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptParams {
    /// Name of the camera object the statements assign to.
    pub object: String,
    /// Digits after the decimal point.
    pub precision: usize,
}

impl Default for ScriptParams {
    fn default() -> Self {
        Self {
            object: "camera".to_string(),
            precision: 6,
        }
    }
}

/// Render the pose as two assignment statements:
///
/// ```text
/// camera.matrix_world = ((r00, r01, r02, x), (r10, r11, r12, y), (r20, r21, r22, z), (0, 0, 0, 1))
/// camera.lens = f
/// ```
///
/// The rotation rows are those of [`crate::CameraPose::camera_rotation`] and
/// the translation column is the camera location.
///
/// # Errors
///
/// - [`CalibError::MissingPose`] if the result has no focal length or pose.
/// - [`CalibError::MissingDistance`] if the pose has no location.
pub fn pose_script(result: &CalibrationResult, params: &ScriptParams) -> Result<String, CalibError> {
    let (Some(focal), Some(pose)) = (&result.focal, &result.pose) else {
        return Err(CalibError::MissingPose);
    };
    let location = pose.location.ok_or(CalibError::MissingDistance)?;
    let rotation = pose.camera_rotation.to_array3()?;

    let p = params.precision;
    let rows = rotation
        .iter()
        .zip(location)
        .map(|(r, t)| format!("({:.p$}, {:.p$}, {:.p$}, {:.p$})", r[0], r[1], r[2], t))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "{obj}.matrix_world = ({rows}, (0, 0, 0, 1))\n{obj}.lens = {lens:.p$}",
        obj = params.object,
        lens = focal.focal_length,
    ))
}
