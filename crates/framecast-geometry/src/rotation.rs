//! Unit-quaternion rotations and the builders that construct them.
//!
//! The quaternion is the single rotation representation used across the
//! workspace; it is also what goes onto the wire, so there is no separate
//! matrix type to keep in sync.
//!
//! # Euler convention
//!
//! [`Quaternion::from_euler_rpy`] uses **extrinsic XYZ** angles: roll about
//! the fixed x axis, then pitch about the fixed y axis, then yaw about the
//! fixed z axis, composing to `Rz(yaw) · Ry(pitch) · Rx(roll)` (equivalently
//! intrinsic ZYX).  Euler orders are a common ambiguity source, so the
//! convention is pinned by tests rather than left implicit.
//!
//! # Double cover
//!
//! `q` and `-q` represent the same rotation.  Compare rotations by their
//! action on probe vectors, never by raw component equality.

use serde::{Deserialize, Serialize};

use crate::vector::{Vec3, ZERO_NORM_EPS};
use crate::GeometryError;

/// A rotation represented as a unit quaternion (w, x, y, z convention).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Create a quaternion from raw components.  The caller is responsible
    /// for providing a unit quaternion (|q| = 1).
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation (no rotation).
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Build a rotation of `angle` radians about `axis`.
    ///
    /// The axis need not be pre-normalized; it is scaled to unit length
    /// internally.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateAxis`] when the axis has near-zero
    /// norm: there is no direction to rotate about, and silently returning
    /// the identity would mask the upstream bug.
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Result<Self, GeometryError> {
        let unit = axis.normalize()?;
        Ok(Self::from_unit_axis_angle(unit, angle))
    }

    /// Build a rotation of `angle` radians about an axis that is already
    /// unit length.
    pub fn from_unit_axis_angle(axis: Vec3, angle: f64) -> Self {
        debug_assert!(
            (axis.norm() - 1.0).abs() < 1e-6,
            "from_unit_axis_angle requires a unit axis, got norm {}",
            axis.norm()
        );
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(half.cos(), axis.x * s, axis.y * s, axis.z * s)
    }

    /// Build a rotation from roll/pitch/yaw Euler angles (radians).
    ///
    /// Convention: extrinsic XYZ – roll about the fixed x axis, then pitch
    /// about the fixed y axis, then yaw about the fixed z axis, i.e.
    /// `Rz(yaw) · Ry(pitch) · Rx(roll)`.
    pub fn from_euler_rpy(roll: f64, pitch: f64, yaw: f64) -> Self {
        let qx = Self::from_unit_axis_angle(Vec3::X, roll);
        let qy = Self::from_unit_axis_angle(Vec3::Y, pitch);
        let qz = Self::from_unit_axis_angle(Vec3::Z, yaw);
        qz.mul(qy).mul(qx)
    }

    /// Hamilton product: compose two rotations.  `a.mul(b)` applies `b`
    /// first, then `a`.
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotate a vector by this quaternion: p' = q · p · q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let p = Self::new(0.0, v.x, v.y, v.z);
        let rotated = self.mul(p).mul(self.conjugate());
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }

    /// Quaternion norm.
    pub fn norm(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// `true` when |q| is within `tol` of 1.
    pub fn is_unit(self, tol: f64) -> bool {
        (self.norm() - 1.0).abs() < tol
    }

    /// Components in the (x, y, z, w) order used by the wire representation.
    pub fn xyzw(self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.z, self.w)
    }

    /// Scale to unit norm.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateAxis`] for a near-zero quaternion.
    pub fn normalized(self) -> Result<Self, GeometryError> {
        let n = self.norm();
        if n < ZERO_NORM_EPS {
            return Err(GeometryError::DegenerateAxis(
                "cannot normalize a zero quaternion",
            ));
        }
        Ok(Self::new(self.w / n, self.x / n, self.y / n, self.z / n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(v: Vec3, expected: Vec3) {
        assert!((v.x - expected.x).abs() < 1e-9, "x={}, want {}", v.x, expected.x);
        assert!((v.y - expected.y).abs() < 1e-9, "y={}, want {}", v.y, expected.y);
        assert!((v.z - expected.z).abs() < 1e-9, "z={}, want {}", v.z, expected.z);
    }

    #[test]
    fn identity_rotate_is_noop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_close(Quaternion::identity().rotate(v), v);
    }

    #[test]
    fn quarter_turn_about_z_rotates_x_to_y() {
        let q = Quaternion::from_unit_axis_angle(Vec3::Z, FRAC_PI_2);
        assert_close(q.rotate(Vec3::X), Vec3::Y);
    }

    #[test]
    fn conjugate_undoes_rotation() {
        let q = Quaternion::from_euler_rpy(0.3, -0.7, 1.2);
        let v = Vec3::new(0.5, -1.5, 2.0);
        assert_close(q.conjugate().rotate(q.rotate(v)), v);
    }

    #[test]
    fn builders_produce_unit_quaternions() {
        let q1 = Quaternion::from_axis_angle(Vec3::new(1.0, 2.0, -3.0), 0.9).unwrap();
        let q2 = Quaternion::from_euler_rpy(0.79, 0.0, 0.79);
        assert!(q1.is_unit(1e-12));
        assert!(q2.is_unit(1e-12));
    }

    #[test]
    fn from_axis_angle_normalizes_the_axis() {
        // Same rotation from a scaled axis.
        let q1 = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 10.0), 1.5).unwrap();
        let q2 = Quaternion::from_unit_axis_angle(Vec3::Z, 1.5);
        let probe = Vec3::new(1.0, -2.0, 0.5);
        assert_close(q1.rotate(probe), q2.rotate(probe));
    }

    #[test]
    fn from_axis_angle_zero_axis_is_an_error() {
        assert!(Quaternion::from_axis_angle(Vec3::ZERO, 1.0).is_err());
    }

    #[test]
    fn euler_yaw_only_matches_axis_angle_about_z() {
        let q_euler = Quaternion::from_euler_rpy(0.0, 0.0, 1.5);
        let q_axis = Quaternion::from_unit_axis_angle(Vec3::Z, 1.5);
        let probe = Vec3::new(1.0, 1.0, 1.0);
        assert_close(q_euler.rotate(probe), q_axis.rotate(probe));
    }

    /// Pins the extrinsic-XYZ order: roll is applied before yaw, both about
    /// fixed axes.  Under Rz(π/2)·Rx(π/2) the z axis maps to x; the reversed
    /// (intrinsic-XYZ) order would map it to -y instead.
    #[test]
    fn euler_order_is_extrinsic_xyz() {
        let q = Quaternion::from_euler_rpy(FRAC_PI_2, 0.0, FRAC_PI_2);
        assert_close(q.rotate(Vec3::Z), Vec3::X);
    }

    #[test]
    fn half_turn_about_z_flips_x() {
        let q = Quaternion::from_unit_axis_angle(Vec3::Z, PI);
        assert_close(q.rotate(Vec3::X), -Vec3::X);
    }

    #[test]
    fn double_cover_negated_quaternion_is_same_rotation() {
        let q = Quaternion::from_euler_rpy(0.4, 0.8, -0.2);
        let neg = Quaternion::new(-q.w, -q.x, -q.y, -q.z);
        let probe = Vec3::new(-1.0, 0.25, 3.0);
        assert_close(q.rotate(probe), neg.rotate(probe));
    }

    /// Round trip through the wire representation and compare by effect on
    /// a probe vector, not by raw components (double cover).
    #[test]
    fn wire_roundtrip_preserves_rotation_action() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, -2.0, 0.5), 0.77).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        let back: Quaternion = serde_json::from_str(&json).unwrap();
        let probe = Vec3::new(0.2, 1.4, -3.0);
        let (v, w) = (q.rotate(probe), back.rotate(probe));
        assert!((v - w).norm() < 1e-6);
    }

    #[test]
    fn normalized_rescales_to_unit() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0).normalized().unwrap();
        assert!(q.is_unit(1e-12));
        assert!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalized().is_err());
    }
}
