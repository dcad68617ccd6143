#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! Two image corners whose edges follow two world axes define two vanishing
//! points. Assuming the two vanishing directions are orthogonal, they fix the
//! focal length; together with an axis assignment they fix the camera
//! orientation, and with a known distance to a reference point the camera
//! position.
//!
//! ```rust
//! use twopoint_calib::{calibrate, AxisAssignment, CalibrationInput, Corner};
//!
//! let corners = [
//!     Corner::new([-0.30, 0.07], [0.04, 0.24], [-0.08, -0.10]),
//!     Corner::new([0.36, 0.21], [0.17, 0.27], [0.11, -0.02]),
//! ];
//! let input = CalibrationInput::new(corners, AxisAssignment::default(), 36.0)
//!     .with_origin_distance(10.0);
//! let result = calibrate(&input)?;
//! assert!(result.withheld.is_empty());
//! # Ok::<(), twopoint_calib::CalibError>(())
//! ```

mod error;
pub use error::CalibError;

/// Corners, axis labels and calibration inputs.
pub mod types;
pub use types::{AxisAssignment, CalibrationInput, Corner, ImageSize, Sign, SignedAxis};

/// Vanishing points from two corners.
pub mod vanishing;
pub use vanishing::{intersect_rays, vanishing_points};

/// Focal length from the orthogonality of two vanishing directions.
pub mod focal;
pub use focal::{estimate_focal, field_of_view, FocalEstimate};

/// World basis from vanishing directions and axis labels.
pub mod world;
pub use world::WorldTransform;

pub mod euler;
pub use euler::{extract_euler, EulerAngles};

/// Camera position from a reference point at a known distance.
pub mod location;
pub use location::estimate_location;

/// The full pipeline.
pub mod pipeline;
pub use pipeline::{calibrate, CalibrationResult, CameraPose};

pub mod export;
pub use export::{pose_script, ScriptParams};
