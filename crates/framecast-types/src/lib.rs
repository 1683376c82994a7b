//! `framecast-types` – shared wire types and the workspace error enum.
//!
//! A [`FrameEdge`] is the unit of output for the whole system: one named,
//! timestamped parent→child transform, carried as a translation vector plus
//! a unit quaternion (the layout of a ROS `geometry_msgs/TransformStamped`).
//! Edges are immutable once built and freshly constructed every broadcast
//! cycle; the only identity they carry is their frame-name pair.

use chrono::{DateTime, Utc};
use framecast_geometry::{GeometryError, Quaternion, Transform3D, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One timestamped parent→child transform record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEdge {
    /// Name of the parent frame (e.g. `"base_frame"`).
    pub parent_frame: String,
    /// Name of the child frame (e.g. `"robot_frame"`).
    pub child_frame: String,
    /// Child origin expressed in the parent frame.
    pub translation: Vec3,
    /// Child orientation relative to the parent, as a unit quaternion.
    pub rotation: Quaternion,
    /// Time at which this pose snapshot was taken.
    pub stamp: DateTime<Utc>,
}

impl FrameEdge {
    /// Build an edge from a rigid transform and a timestamp.
    pub fn new(
        parent_frame: impl Into<String>,
        child_frame: impl Into<String>,
        transform: &Transform3D,
        stamp: DateTime<Utc>,
    ) -> Self {
        Self {
            parent_frame: parent_frame.into(),
            child_frame: child_frame.into(),
            translation: transform.translation,
            rotation: transform.rotation,
            stamp,
        }
    }

    /// Reassemble the rigid transform this edge carries.
    pub fn transform(&self) -> Transform3D {
        Transform3D::new(self.translation, self.rotation)
    }
}

/// Global error type spanning geometry misuse, bus transport, and
/// configuration failures.
#[derive(Debug, Clone, Error)]
pub enum FramecastError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("channel error: {0}")]
    Channel(String),

    #[error("config error: {0}")]
    Config(String),
}
