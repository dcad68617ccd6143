use serde::{Deserialize, Serialize};
use twopoint_linalg::{vector, Axis, Matrix};

use crate::{AxisAssignment, CalibError, FocalEstimate};

/// Orthonormal basis relating world axes to camera space.
///
/// Row `k` of `basis` is world axis `k` expressed in camera coordinates, so
/// the basis maps camera-space vectors to world coordinates and its
/// transpose maps world-space vectors to camera coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    basis: Matrix,
}

impl WorldTransform {
    /// Build the basis from the vanishing points and their axis assignment.
    ///
    /// Each vanishing ray, multiplied by the sign of its assignment, becomes
    /// the row of its assigned axis. The unassigned row `k` is
    /// `row[k + 1] x row[k + 2]` (indices mod 3), which keeps the basis
    /// right-handed.
    ///
    /// # Errors
    ///
    /// - [`CalibError::AmbiguousAxisAssignment`] if both vanishing points use
    ///   the same axis.
    /// - [`CalibError::Linalg`] if a ray cannot be normalised.
    pub fn from_vanishing_points(
        vanishing_points: &[[f64; 2]; 2],
        axes: &AxisAssignment,
        focal: &FocalEstimate,
    ) -> Result<Self, CalibError> {
        axes.validate()?;

        let mut rows: [Option<[f64; 3]>; 3] = [None; 3];
        for (vp, assigned) in vanishing_points.iter().zip(axes.as_array()) {
            let ray = focal.ray_direction(*vp)?;
            let signed = vector::scale(&ray, assigned.sign.factor());
            rows[assigned.axis.index()] = Some(vector::to_array3(&signed));
        }

        let missing = Axis::ALL
            .into_iter()
            .find(|axis| rows[axis.index()].is_none())
            .ok_or(CalibError::AmbiguousAxisAssignment {
                axis: axes.first.axis,
            })?;
        let after = missing.next();
        let (Some(u), Some(v)) = (rows[after.index()], rows[after.next().index()]) else {
            return Err(CalibError::AmbiguousAxisAssignment { axis: missing });
        };
        rows[missing.index()] = Some(vector::cross(&u, &v));

        let mut basis = [[0.0; 3]; 3];
        for (dst, src) in basis.iter_mut().zip(rows) {
            *dst = src.unwrap_or_default();
        }
        log::debug!("world basis: {:?}", basis);

        Ok(Self {
            basis: Matrix::from_array3(&basis),
        })
    }

    /// Rows are world axes in camera coordinates (camera -> world).
    pub fn basis(&self) -> &Matrix {
        &self.basis
    }

    /// Rotation taking world-space vectors to camera space.
    pub fn world_to_camera(&self) -> Matrix {
        self.basis.transpose()
    }

    /// Rotation taking camera-space vectors to world space, computed as the
    /// inverse of [`Self::world_to_camera`].
    pub fn camera_to_world(&self) -> Result<Matrix, CalibError> {
        Ok(self.world_to_camera().inverse()?)
    }
}
