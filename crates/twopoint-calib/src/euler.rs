//! Tait-Bryan angle extraction.
//!
//! A rotation `M = Rz(gamma) * Ry(beta) * Rx(alpha)` determines its angles
//! only up to a branch choice: `gamma` and `gamma + pi` share the same
//! tangent, `beta` and `pi - beta` the same sine. All four combinations are
//! generated, `alpha` is solved for each, and the candidate that rebuilds `M`
//! with the smallest squared error wins.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use twopoint_linalg::{rotation_3d, Axis, Matrix};

use crate::CalibError;

/// Rotation angles in radians, applied as `Rz(gamma) * Ry(beta) * Rx(alpha)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Rotation about x.
    pub alpha: f64,
    /// Rotation about y.
    pub beta: f64,
    /// Rotation about z.
    pub gamma: f64,
}

impl EulerAngles {
    /// Create angles from radians.
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }

    /// `[alpha, beta, gamma]` in degrees.
    pub fn to_degrees(&self) -> [f64; 3] {
        [
            self.alpha.to_degrees(),
            self.beta.to_degrees(),
            self.gamma.to_degrees(),
        ]
    }

    /// Compose the rotation `Rz(gamma) * Ry(beta) * Rx(alpha)`.
    pub fn to_matrix(&self) -> Result<Matrix, CalibError> {
        let rz = rotation_3d(Axis::Z, self.gamma);
        let ry = rotation_3d(Axis::Y, self.beta);
        let rx = rotation_3d(Axis::X, self.alpha);
        Ok(rz.matmul(&ry)?.matmul(&rx)?)
    }
}

struct Candidate {
    angles: EulerAngles,
    error: f64,
}

fn score(m: &Matrix, gamma: f64, beta: f64) -> Result<Candidate, CalibError> {
    let rz_inv = rotation_3d(Axis::Z, gamma).inverse()?;
    let ry_inv = rotation_3d(Axis::Y, beta).inverse()?;
    let residual = ry_inv.matmul(&rz_inv)?.matmul(m)?;
    let alpha = residual[(2, 1)].atan2(residual[(1, 1)]);

    let angles = EulerAngles::new(alpha, beta, gamma);
    let error = angles.to_matrix()?.squared_distance(m)?;
    Ok(Candidate { angles, error })
}

/// Decompose a 3x3 rotation into the angles that best reconstruct it.
///
/// Candidates are scored in the order `(g0, b0)`, `(g0, b1)`, `(g1, b0)`,
/// `(g1, b1)` with `g0 = atan(M[1][0] / M[0][0])`, `g1 = g0 + pi`,
/// `b0 = -asin(M[2][0])` and `b1 = pi - b0`; on equal error the earlier
/// candidate is kept.
///
/// # Errors
///
/// Returns [`CalibError::Linalg`] if `m` is not 3x3.
///
/// Example:
///
/// ```
/// use twopoint_calib::{extract_euler, EulerAngles};
///
/// let m = EulerAngles::new(0.3, -0.2, 1.1).to_matrix()?;
/// let angles = extract_euler(&m)?;
/// assert!(angles.to_matrix()?.squared_distance(&m)? < 1e-20);
/// # Ok::<(), twopoint_calib::CalibError>(())
/// ```
pub fn extract_euler(m: &Matrix) -> Result<EulerAngles, CalibError> {
    let m = Matrix::from_array3(&m.to_array3()?);

    // gimbal lock leaves gamma free; pick zero
    let gamma0 = if m[(0, 0)] == 0.0 && m[(1, 0)] == 0.0 {
        0.0
    } else {
        (m[(1, 0)] / m[(0, 0)]).atan()
    };
    let beta0 = -m[(2, 0)].clamp(-1.0, 1.0).asin();

    let pairs = [
        (gamma0, beta0),
        (gamma0, PI - beta0),
        (gamma0 + PI, beta0),
        (gamma0 + PI, PI - beta0),
    ];

    let mut best: Option<Candidate> = None;
    for (gamma, beta) in pairs {
        let candidate = score(&m, gamma, beta)?;
        log::trace!(
            "euler candidate {:?} error {:e}",
            candidate.angles,
            candidate.error
        );
        if best.as_ref().map_or(true, |b| candidate.error < b.error) {
            best = Some(candidate);
        }
    }

    let best = best.ok_or(CalibError::MissingPose)?;
    log::debug!(
        "euler angles (deg) {:?}, reconstruction error {:e}",
        best.angles.to_degrees(),
        best.error
    );
    Ok(best.angles)
}
