#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `twopoint-linalg` provides the handful of dense primitives the calibration
//! pipeline needs: an owned row-major [`Matrix`] with Gauss-Jordan inversion,
//! axis-aligned 3D rotations and slice-based vector helpers.
//!
//! ```rust
//! use twopoint_linalg::{rotation_3d, Axis, Matrix};
//!
//! let r = rotation_3d(Axis::Z, std::f64::consts::FRAC_PI_2);
//! let r_inv = r.inverse()?;
//! let identity = r.matmul(&r_inv)?;
//! assert!(identity.squared_distance(&Matrix::identity(3))? < 1e-20);
//! # Ok::<(), twopoint_linalg::LinalgError>(())
//! ```

mod error;
pub use error::LinalgError;

/// Owned row-major matrices.
pub mod matrix;
pub use matrix::Matrix;

/// Axis-aligned rotation matrices.
pub mod rotation;
pub use rotation::{rotation_3d, Axis};

/// Vector helpers over slices and 3-arrays.
pub mod vector;
