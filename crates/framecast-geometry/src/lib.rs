//! `framecast-geometry` – rigid-transform math core.
//!
//! Everything needed to pose a small tree of coordinate frames: vectors,
//! unit-quaternion rotations, rigid transforms with composition and
//! inversion, and the closed-form aim solve that points an axis at a target.
//! All operations are pure functions over `Copy` values.
//!
//! # Modules
//!
//! - [`vector`] – [`Vec3`]: f64 vector with dot, cross, and fallible
//!   normalization.
//! - [`rotation`] – [`Quaternion`]: Hamilton algebra plus the Euler-RPY and
//!   axis-angle builders (Euler convention: extrinsic XYZ, pinned by tests).
//! - [`transform`] – [`Transform3D`]: rotation+translation pairs with
//!   `compose` and `inverse`.
//! - [`aim`] – [`aim_rotation`]: minimal rotation mapping one direction onto
//!   another, with a deterministic fallback for the (anti)parallel case.
//!
//! # Example
//!
//! ```rust
//! use framecast_geometry::{Quaternion, Transform3D, Vec3};
//!
//! // A frame rotated 1.5 rad about z, then shifted along its own y axis.
//! let pose = Transform3D::from_rotation(Quaternion::from_euler_rpy(0.0, 0.0, 1.5))
//!     .compose(Transform3D::from_translation(Vec3::new(0.0, -1.0, 0.0)));
//!
//! let round_trip = pose.compose(pose.inverse());
//! assert!(round_trip.translation.norm() < 1e-9);
//! ```

use thiserror::Error;

pub mod aim;
pub mod rotation;
pub mod transform;
pub mod vector;

pub use aim::{aim_rotation, AxisAngle};
pub use rotation::Quaternion;
pub use transform::Transform3D;
pub use vector::Vec3;

/// Errors from the geometric primitives.
///
/// These indicate misuse (a zero-length vector where a direction is
/// required), not runtime conditions; well-formed scene inputs never
/// produce them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("degenerate axis: {0}")]
    DegenerateAxis(&'static str),
}
