//! Per-cycle solve of the three-frame scene and its broadcast emission.
//!
//! The scene is fixed and acyclic: base→object, base→robot, robot→camera.
//! The object and robot poses come from constant inputs; the camera pose is
//! solved fresh every cycle so its local x axis points at the object origin.
//!
//! The topology itself is data, not control flow: [`SceneBuilder`] walks a
//! table of [`EdgeSpec`] entries, each naming a parent, a child, and which
//! solved pose the edge carries.  Adding a frame means adding a table entry,
//! not editing the solve.

use std::sync::Arc;

use framecast_geometry::{aim_rotation, Quaternion, Transform3D, Vec3};
use framecast_middleware::FrameSink;
use framecast_types::{FrameEdge, FramecastError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

/// Scene inputs: frame names and the constant pose parameters.
///
/// Defaults reproduce the reference scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Root frame name.
    #[serde(default = "default_base_frame")]
    pub base_frame: String,

    /// Child of base carrying the object pose.
    #[serde(default = "default_object_frame")]
    pub object_frame: String,

    /// Child of base carrying the robot pose.
    #[serde(default = "default_robot_frame")]
    pub robot_frame: String,

    /// Child of robot carrying the aimed camera pose.
    #[serde(default = "default_camera_frame")]
    pub camera_frame: String,

    /// Object orientation as (roll, pitch, yaw) radians.
    #[serde(default = "default_object_rpy")]
    pub object_rpy: (f64, f64, f64),

    /// Object offset, applied along the object's rotated axes.
    #[serde(default = "default_object_translation")]
    pub object_translation: Vec3,

    /// Robot rotation about the z axis, radians.
    #[serde(default = "default_robot_yaw")]
    pub robot_yaw: f64,

    /// Robot offset, applied along the robot's rotated axes.
    #[serde(default = "default_robot_translation")]
    pub robot_translation: Vec3,

    /// Camera origin relative to the robot origin, in robot coordinates.
    #[serde(default = "default_camera_offset")]
    pub camera_offset: Vec3,
}

fn default_base_frame() -> String {
    "base_frame".to_string()
}
fn default_object_frame() -> String {
    "object_frame".to_string()
}
fn default_robot_frame() -> String {
    "robot_frame".to_string()
}
fn default_camera_frame() -> String {
    "camera_frame".to_string()
}
fn default_object_rpy() -> (f64, f64, f64) {
    (0.79, 0.0, 0.79)
}
fn default_object_translation() -> Vec3 {
    Vec3::new(0.0, 1.0, 1.0)
}
fn default_robot_yaw() -> f64 {
    1.5
}
fn default_robot_translation() -> Vec3 {
    Vec3::new(0.0, -1.0, 0.0)
}
fn default_camera_offset() -> Vec3 {
    Vec3::new(0.0, 0.1, 0.1)
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            base_frame: default_base_frame(),
            object_frame: default_object_frame(),
            robot_frame: default_robot_frame(),
            camera_frame: default_camera_frame(),
            object_rpy: default_object_rpy(),
            object_translation: default_object_translation(),
            robot_yaw: default_robot_yaw(),
            robot_translation: default_robot_translation(),
            camera_offset: default_camera_offset(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Topology
// ────────────────────────────────────────────────────────────────────────────

/// The three poses produced by one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePoses {
    pub base_to_object: Transform3D,
    pub base_to_robot: Transform3D,
    pub robot_to_camera: Transform3D,
}

/// One edge of the scene tree: parent and child names plus a selector for
/// which solved pose the edge carries.
pub struct EdgeSpec {
    pub parent: String,
    pub child: String,
    pub pose: fn(&ScenePoses) -> Transform3D,
}

/// The reference topology: base→object, base→robot, robot→camera.
pub fn default_topology(config: &SceneConfig) -> Vec<EdgeSpec> {
    vec![
        EdgeSpec {
            parent: config.base_frame.clone(),
            child: config.object_frame.clone(),
            pose: |p| p.base_to_object,
        },
        EdgeSpec {
            parent: config.base_frame.clone(),
            child: config.robot_frame.clone(),
            pose: |p| p.base_to_robot,
        },
        EdgeSpec {
            parent: config.robot_frame.clone(),
            child: config.camera_frame.clone(),
            pose: |p| p.robot_to_camera,
        },
    ]
}

// ────────────────────────────────────────────────────────────────────────────
// SceneBuilder
// ────────────────────────────────────────────────────────────────────────────

/// Solves the scene and emits one [`FrameEdge`] per topology entry each
/// cycle.  Stateless across cycles: every snapshot is computed from the
/// config alone, and all edges of one snapshot share a single clock stamp.
///
/// The sink and clock are injected at construction; there is no global
/// broadcaster handle anywhere.
pub struct SceneBuilder {
    config: SceneConfig,
    topology: Vec<EdgeSpec>,
    sink: Arc<dyn FrameSink>,
    clock: Arc<dyn Clock>,
}

impl SceneBuilder {
    /// Build a scene with the reference topology.
    pub fn new(config: SceneConfig, sink: Arc<dyn FrameSink>, clock: Arc<dyn Clock>) -> Self {
        let topology = default_topology(&config);
        Self {
            config,
            topology,
            sink,
            clock,
        }
    }

    /// Build a scene with a caller-supplied topology table.
    pub fn with_topology(
        config: SceneConfig,
        topology: Vec<EdgeSpec>,
        sink: Arc<dyn FrameSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            topology,
            sink,
            clock,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Compute the three poses for the current configuration.
    ///
    /// Pose construction mirrors the reference scene exactly, including its
    /// two different composition orders:
    ///
    /// 1. `base→object` and `base→robot` are rotate-then-translate: the
    ///    translation is applied along the already-rotated axes.
    /// 2. `robot→camera` is translate-then-rotate: the camera sits at a
    ///    fixed offset in robot coordinates and only its orientation is
    ///    solved.
    ///
    /// The camera aim direction is `normalize(r_to + camera_offset)` with
    /// the offset added in *robot-frame* coordinates.  This is a small-
    /// offset approximation inherited from the reference design – the exact
    /// chain would transform the offset through the camera's own rotation,
    /// which is not yet known at this point.
    ///
    /// # Errors
    ///
    /// Fails only when the configured geometry is degenerate (the object
    /// sits exactly at the camera origin, leaving no aim direction).
    pub fn solve(&self) -> Result<ScenePoses, FramecastError> {
        let (roll, pitch, yaw) = self.config.object_rpy;
        let base_to_object = Transform3D::from_rotation(Quaternion::from_euler_rpy(
            roll, pitch, yaw,
        ))
        .compose(Transform3D::from_translation(self.config.object_translation));

        let base_to_robot = Transform3D::from_rotation(Quaternion::from_unit_axis_angle(
            Vec3::Z,
            self.config.robot_yaw,
        ))
        .compose(Transform3D::from_translation(self.config.robot_translation));

        // Object position expressed in the robot frame.
        let robot_to_object = base_to_robot
            .inverse()
            .compose(base_to_object)
            .translation;

        // Approximate direction from the camera origin to the object.
        let camera_to_object = (robot_to_object + self.config.camera_offset).normalize()?;

        let aim = aim_rotation(Vec3::X, camera_to_object)?;
        let robot_to_camera = Transform3D::from_translation(self.config.camera_offset)
            .compose(Transform3D::from_rotation(aim.to_quaternion()));

        Ok(ScenePoses {
            base_to_object,
            base_to_robot,
            robot_to_camera,
        })
    }

    /// Run one broadcast cycle: solve, stamp once, publish every edge.
    ///
    /// Publishing is fire-and-forget: transport errors (typically "no
    /// subscribers yet") are logged at debug level and do not fail the
    /// cycle.  Returns the emitted edges.
    ///
    /// # Errors
    ///
    /// Propagates [`SceneBuilder::solve`] failures; transport errors never
    /// surface here.
    pub fn tick(&self) -> Result<Vec<FrameEdge>, FramecastError> {
        let poses = self.solve()?;
        // One stamp for the whole snapshot so downstream consumers see a
        // synchronized scene.
        let stamp = self.clock.now();

        let edges: Vec<FrameEdge> = self
            .topology
            .iter()
            .map(|spec| {
                FrameEdge::new(
                    spec.parent.as_str(),
                    spec.child.as_str(),
                    &(spec.pose)(&poses),
                    stamp,
                )
            })
            .collect();

        for edge in &edges {
            if let Err(e) = self.sink.publish(edge.clone()) {
                debug!(error = %e, "best-effort publish skipped");
            }
        }

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    const TOL: f64 = 1e-9;

    /// Sink that records everything published to it.
    #[derive(Default)]
    struct RecordingSink {
        edges: Mutex<Vec<FrameEdge>>,
    }

    impl FrameSink for RecordingSink {
        fn publish(&self, edge: FrameEdge) -> Result<usize, FramecastError> {
            self.edges.lock().unwrap().push(edge);
            Ok(1)
        }
    }

    /// Sink that rejects everything, simulating a listener-less bus.
    struct DeafSink;

    impl FrameSink for DeafSink {
        fn publish(&self, _edge: FrameEdge) -> Result<usize, FramecastError> {
            Err(FramecastError::Channel("no subscribers".to_string()))
        }
    }

    fn assert_close(v: Vec3, expected: Vec3) {
        assert!((v.x - expected.x).abs() < TOL, "x={}, want {}", v.x, expected.x);
        assert!((v.y - expected.y).abs() < TOL, "y={}, want {}", v.y, expected.y);
        assert!((v.z - expected.z).abs() < TOL, "z={}, want {}", v.z, expected.z);
    }

    fn reference_scene() -> SceneBuilder {
        SceneBuilder::new(
            SceneConfig::default(),
            Arc::new(RecordingSink::default()),
            Arc::new(ManualClock::new(Utc::now(), Duration::milliseconds(50))),
        )
    }

    #[test]
    fn object_translation_is_applied_along_rotated_axes() {
        let poses = reference_scene().solve().unwrap();
        // Rotate-then-translate: the object origin is R·(0,1,1), not (0,1,1).
        let rotation = Quaternion::from_euler_rpy(0.79, 0.0, 0.79);
        assert_close(
            poses.base_to_object.translation,
            rotation.rotate(Vec3::new(0.0, 1.0, 1.0)),
        );
    }

    /// Cross-checks the transform-algebra path against direct quaternion
    /// arithmetic: r_to must equal R2⁻¹ · (t1 − t2).
    #[test]
    fn robot_frame_object_position_matches_naive_path() {
        let poses = reference_scene().solve().unwrap();
        let algebra = poses
            .base_to_robot
            .inverse()
            .compose(poses.base_to_object)
            .translation;

        let t1 = poses.base_to_object.translation;
        let t2 = poses.base_to_robot.translation;
        let naive = Quaternion::from_unit_axis_angle(Vec3::Z, 1.5)
            .conjugate()
            .rotate(t1 - t2);

        assert_close(algebra, naive);
    }

    #[test]
    fn camera_sits_at_fixed_offset_in_robot_coordinates() {
        let poses = reference_scene().solve().unwrap();
        // Translate-then-rotate: the aim solve must not move the camera.
        assert_close(poses.robot_to_camera.translation, Vec3::new(0.0, 0.1, 0.1));
    }

    #[test]
    fn camera_x_axis_points_at_the_object() {
        let scene = reference_scene();
        let poses = scene.solve().unwrap();

        let robot_to_object = poses
            .base_to_robot
            .inverse()
            .compose(poses.base_to_object)
            .translation;
        let expected_direction = (robot_to_object + scene.config().camera_offset)
            .normalize()
            .unwrap();

        let camera_x = poses.robot_to_camera.rotation.rotate(Vec3::X);
        // 1e-6: the aim guarantee tolerance, looser than pure composition.
        assert!((camera_x - expected_direction).norm() < 1e-6);
    }

    #[test]
    fn tick_emits_one_edge_per_topology_entry_with_shared_stamp() {
        let sink = Arc::new(RecordingSink::default());
        let start = Utc::now();
        let scene = SceneBuilder::new(
            SceneConfig::default(),
            sink.clone(),
            Arc::new(ManualClock::new(start, Duration::milliseconds(50))),
        );

        let edges = scene.tick().unwrap();
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|e| e.stamp == start));

        let names: Vec<(&str, &str)> = edges
            .iter()
            .map(|e| (e.parent_frame.as_str(), e.child_frame.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("base_frame", "object_frame"),
                ("base_frame", "robot_frame"),
                ("robot_frame", "camera_frame"),
            ]
        );

        // Everything that was returned was also handed to the sink.
        assert_eq!(*sink.edges.lock().unwrap(), edges);
    }

    #[test]
    fn consecutive_ticks_have_increasing_stamps() {
        let scene = reference_scene();
        let first = scene.tick().unwrap();
        let second = scene.tick().unwrap();
        assert!(second[0].stamp > first[0].stamp);
    }

    #[test]
    fn tick_is_best_effort_when_nobody_listens() {
        let scene = SceneBuilder::new(
            SceneConfig::default(),
            Arc::new(DeafSink),
            Arc::new(ManualClock::new(Utc::now(), Duration::milliseconds(50))),
        );
        // A deaf sink must not fail the cycle.
        assert_eq!(scene.tick().unwrap().len(), 3);
    }

    #[test]
    fn degenerate_config_surfaces_a_geometry_error() {
        // Object exactly at the camera origin: no aim direction exists.
        let config = SceneConfig {
            object_rpy: (0.0, 0.0, 0.0),
            object_translation: Vec3::new(0.0, -1.1, -0.1),
            robot_yaw: 0.0,
            ..SceneConfig::default()
        };
        let scene = SceneBuilder::new(
            config,
            Arc::new(RecordingSink::default()),
            Arc::new(ManualClock::new(Utc::now(), Duration::milliseconds(50))),
        );
        assert!(scene.solve().is_err());
    }

    #[test]
    fn custom_topology_is_honored() {
        let config = SceneConfig::default();
        let topology = vec![EdgeSpec {
            parent: config.robot_frame.clone(),
            child: config.camera_frame.clone(),
            pose: |p| p.robot_to_camera,
        }];
        let scene = SceneBuilder::with_topology(
            config,
            topology,
            Arc::new(RecordingSink::default()),
            Arc::new(ManualClock::new(Utc::now(), Duration::milliseconds(50))),
        );
        let edges = scene.tick().unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].child_frame, "camera_frame");
    }
}
