use serde::{Deserialize, Serialize};

use crate::Matrix;

/// A coordinate axis of 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// The x axis, index 0.
    X,
    /// The y axis, index 1.
    Y,
    /// The z axis, index 2.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Index of the axis (x=0, y=1, z=2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis for an index in `0..3`.
    pub fn from_index(index: usize) -> Option<Axis> {
        Self::ALL.get(index).copied()
    }

    /// The axis that follows this one in cyclic order (x -> y -> z -> x).
    pub fn next(self) -> Axis {
        Self::ALL[(self.index() + 1) % 3]
    }
}

/// Compute the right-handed rotation matrix about a coordinate axis.
///
/// For the axis `a`, let `i = a + 1` and `j = a + 2` (mod 3). The row and
/// column of `a` are those of the identity, `R[i][i] = R[j][j] = cos(angle)`,
/// `R[i][j] = -sin(angle)` and `R[j][i] = sin(angle)`.
///
/// Example:
///
/// ```
/// use twopoint_linalg::{rotation_3d, Axis};
///
/// let r = rotation_3d(Axis::Z, std::f64::consts::FRAC_PI_2);
/// let v = r.mul_vec(&[1.0, 0.0, 0.0]).unwrap();
/// assert!((v[1] - 1.0).abs() < 1e-12);
/// ```
pub fn rotation_3d(axis: Axis, angle: f64) -> Matrix {
    let a = axis.index();
    let i = (a + 1) % 3;
    let j = (a + 2) % 3;
    let (s, c) = angle.sin_cos();

    let mut rows = [[0.0; 3]; 3];
    rows[a][a] = 1.0;
    rows[i][i] = c;
    rows[j][j] = c;
    rows[i][j] = -s;
    rows[j][i] = s;
    Matrix::from_array3(&rows)
}
