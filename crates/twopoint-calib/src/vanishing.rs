use twopoint_linalg::{vector, LinalgError, Matrix};

use crate::{CalibError, Corner};

/// Intersect the rays `o1 + t * p1` and `o2 + s * p2`.
///
/// Solves `[[p1.x, -p2.x], [p1.y, -p2.y]] * [t, s] = o2 - o1` by inverting the
/// system matrix and returns `o1 + t * p1`.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] when the directions are parallel.
pub fn intersect_rays(
    o1: &[f64; 2],
    p1: &[f64; 2],
    o2: &[f64; 2],
    p2: &[f64; 2],
) -> Result<[f64; 2], LinalgError> {
    let system = Matrix::from_rows(&[[p1[0], -p2[0]], [p1[1], -p2[1]]])?;
    let rhs = vector::subtract(o2, o1);
    let params = system.inverse()?.mul_vec(&rhs)?;
    let t = params[0];
    let point = vector::add(o1, &vector::scale(p1, t));
    Ok([point[0], point[1]])
}

/// Compute the two vanishing points of a pair of corners.
///
/// Vanishing point `i` is the intersection of edge `i` of the first corner
/// with edge `i` of the second one.
///
/// # Errors
///
/// Returns [`CalibError::SingularGeometry`] with the offending family when a
/// pair of corresponding edges is parallel.
///
/// Example:
///
/// ```
/// use twopoint_calib::{vanishing_points, Corner};
///
/// let a = Corner::from_absolute([-1.0, 0.0], [-0.5, 0.5], [-0.5, -0.5]);
/// let b = Corner::from_absolute([1.0, 0.0], [0.5, 0.5], [0.5, -0.5]);
/// let vps = vanishing_points(&[a, b])?;
/// assert!(vps[0][0].abs() < 1e-12 && (vps[0][1] - 1.0).abs() < 1e-12);
/// assert!(vps[1][0].abs() < 1e-12 && (vps[1][1] + 1.0).abs() < 1e-12);
/// # Ok::<(), twopoint_calib::CalibError>(())
/// ```
pub fn vanishing_points(corners: &[Corner; 2]) -> Result<[[f64; 2]; 2], CalibError> {
    let [a, b] = corners;
    let mut vps = [[0.0; 2]; 2];
    for (family, vp) in vps.iter_mut().enumerate() {
        *vp = intersect_rays(
            &a.anchor,
            &a.edge_direction(family),
            &b.anchor,
            &b.edge_direction(family),
        )
        .map_err(|e| match e {
            LinalgError::Singular { .. } => CalibError::SingularGeometry { family },
            other => CalibError::Linalg(other),
        })?;
        log::debug!("vanishing point {}: {:?}", family, vp);
    }
    Ok(vps)
}
