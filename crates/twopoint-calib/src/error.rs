use serde::Serialize;
use twopoint_linalg::{Axis, LinalgError};

/// Error types for the calibration pipeline.
///
/// Apart from [`CalibError::SingularGeometry`] and
/// [`CalibError::InvalidSensorLength`], these never abort a calibration: they
/// are recorded in [`crate::CalibrationResult::withheld`] next to the outputs
/// they suppressed.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum CalibError {
    /// Corresponding edges of the two corners are parallel; the vanishing
    /// point lies at infinity.
    #[error("Edges of family {family} are parallel, the vanishing point is at infinity")]
    SingularGeometry {
        /// Edge family (0 or 1) whose vanishing point is undefined.
        family: usize,
    },

    /// The vanishing points do not admit a real, positive focal length.
    #[error("No real focal length for these vanishing points (radicand {radicand})")]
    NoRealFocalLength {
        /// Value of `-(v0 . v1)`; must be positive.
        radicand: f64,
    },

    /// Both vanishing points were assigned to the same world axis.
    #[error("Both vanishing points are assigned to the {axis:?} axis")]
    AmbiguousAxisAssignment {
        /// The axis used twice.
        axis: Axis,
    },

    /// No origin distance was supplied, so the camera location is unknown.
    #[error("Origin distance not provided, camera location withheld")]
    MissingDistance,

    /// Sensor length must be finite and positive.
    #[error("Invalid sensor length {0}, expected a finite positive value")]
    InvalidSensorLength(f64),

    /// Origin distance must be finite and positive.
    #[error("Invalid origin distance {0}, expected a finite positive value")]
    InvalidDistance(f64),

    /// An axis label could not be parsed.
    #[error("Invalid axis label '{0}', expected one of +x, -x, +y, -y, +z, -z")]
    InvalidAxisLabel(String),

    /// The result carries no camera pose.
    #[error("Calibration result has no camera pose")]
    MissingPose,

    /// Linear algebra failure.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}
