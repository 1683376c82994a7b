//! Rigid-body transform algebra.
//!
//! A [`Transform3D`] is the pose of a child frame relative to its parent:
//! a rotation plus a translation, equivalent to a 4x4 homogeneous matrix.
//! Every operation is a pure function returning a new value; there is no
//! mutable state anywhere in this module.

use serde::{Deserialize, Serialize};

use crate::rotation::Quaternion;
use crate::vector::Vec3;

/// Tolerance for the unit-rotation invariant check in [`Transform3D::inverse`].
const UNIT_ROTATION_TOL: f64 = 1e-6;

/// A rigid-body 3-D transform: rotation plus translation.
///
/// To map a point expressed in the child frame into the parent frame,
/// rotate it by `rotation` then add `translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Quaternion,
}

impl Transform3D {
    /// Create a transform from a translation and rotation.
    pub const fn new(translation: Vec3, rotation: Quaternion) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// The identity transform (no translation, no rotation).
    pub const fn identity() -> Self {
        Self::new(Vec3::ZERO, Quaternion::identity())
    }

    /// A pure rotation about the origin.
    pub const fn from_rotation(rotation: Quaternion) -> Self {
        Self::new(Vec3::ZERO, rotation)
    }

    /// A pure translation with no rotation.
    pub const fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quaternion::identity())
    }

    /// Compose two transforms: `a.compose(b)` is the homogeneous-matrix
    /// product `A · B`, the transform that applies `b` first and `a` second.
    ///
    /// If `a` maps frame B into frame A and `b` maps frame C into frame B,
    /// the result maps frame C into frame A.  Associative, not commutative:
    /// `rot.compose(trans)` translates along the rotated axes, while
    /// `trans.compose(rot)` translates along the parent axes.
    pub fn compose(self, other: Self) -> Self {
        Self::new(
            self.translation + self.rotation.rotate(other.translation),
            self.rotation.mul(other.rotation),
        )
    }

    /// Invert the transform: R⁻¹ = R*, t' = -(R⁻¹ · t), so that
    /// `t.compose(t.inverse())` is the identity.
    ///
    /// A non-unit rotation here means some upstream code built a malformed
    /// transform; that is a programming defect, so this asserts loudly in
    /// debug builds instead of propagating a silently-wrong result.
    pub fn inverse(self) -> Self {
        debug_assert!(
            self.rotation.is_unit(UNIT_ROTATION_TOL),
            "inverse of a transform whose rotation is not orthonormal (|q| = {})",
            self.rotation.norm()
        );
        let inv_rotation = self.rotation.conjugate();
        Self::new(-inv_rotation.rotate(self.translation), inv_rotation)
    }
}
