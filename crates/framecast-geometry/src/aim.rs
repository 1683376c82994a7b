//! Aim solver: the minimal rotation that points one axis at a target.
//!
//! Given a reference axis `a` and a target direction `d`, the solve is
//! closed-form: the angle is `acos(a · d)` and the axis is `a × d`.  The dot
//! product is clamped to [-1, 1] first, because floating round-off can push
//! it fractionally outside that range and `acos` would return NaN.
//!
//! When `d` is parallel or antiparallel to `a` the cross product vanishes
//! and leaves the rotation axis undefined.  Rather than emit a NaN rotation,
//! the solver falls back to a deterministic axis perpendicular to the
//! reference: any perpendicular works for the 0 and π angles, and a fixed
//! choice keeps the output reproducible.

use tracing::debug;

use crate::rotation::Quaternion;
use crate::vector::Vec3;
use crate::GeometryError;

/// Cross-product norm below which the target counts as (anti)parallel to
/// the reference axis.
const PARALLEL_EPS: f64 = 1e-9;

/// A rotation as a unit axis and an angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisAngle {
    pub axis: Vec3,
    pub angle: f64,
}

impl AxisAngle {
    /// Convert into the quaternion representation.
    pub fn to_quaternion(self) -> Quaternion {
        Quaternion::from_unit_axis_angle(self.axis, self.angle)
    }
}

/// Compute the minimal rotation that maps `reference` onto `target`.
///
/// Both vectors must be expressed in the same frame; neither needs to be
/// pre-normalized.  For the non-degenerate case, rotating `reference` by the
/// result yields `target`'s direction to floating tolerance.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] when either input has near-zero
/// norm – there is no direction to aim from or at.  A target that is merely
/// parallel or antiparallel to the reference is NOT an error: the solver
/// picks a fixed perpendicular fallback axis (angle 0 or π).
pub fn aim_rotation(reference: Vec3, target: Vec3) -> Result<AxisAngle, GeometryError> {
    let a = reference.normalize()?;
    let d = target.normalize()?;

    // Clamp guards against round-off pushing the dot outside [-1, 1].
    let angle = a.dot(d).clamp(-1.0, 1.0).acos();

    let raw_axis = a.cross(d);
    let n = raw_axis.norm();
    let axis = if n < PARALLEL_EPS {
        // Target is (anti)parallel to the reference: the axis is undefined,
        // so use the fixed perpendicular fallback.
        debug!(
            angle,
            "aim target (anti)parallel to reference; using fallback axis"
        );
        perpendicular_to(a)
    } else {
        raw_axis * (1.0 / n)
    };

    Ok(AxisAngle { axis, angle })
}

/// A deterministic unit vector perpendicular to `v` (which must be unit
/// length): `v × ẑ` unless `v` is collinear with ẑ, in which case `v × x̂`.
fn perpendicular_to(v: Vec3) -> Vec3 {
    let candidate = v.cross(Vec3::Z);
    let n = candidate.norm();
    if n > PARALLEL_EPS {
        candidate * (1.0 / n)
    } else {
        let candidate = v.cross(Vec3::X);
        candidate * (1.0 / candidate.norm())
    }
}
