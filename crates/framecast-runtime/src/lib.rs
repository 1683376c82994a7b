//! `framecast-runtime` – scene solve and broadcast scheduling.
//!
//! The execution layer: turns the static scene configuration into a live
//! stream of timestamped [`FrameEdge`][framecast_types::FrameEdge] records.
//!
//! # Modules
//!
//! - [`scene`] – [`SceneBuilder`][scene::SceneBuilder]: per-cycle solve of
//!   the base→object, base→robot and robot→camera poses (the camera is
//!   re-aimed at the object every cycle) and emission through an injected
//!   [`FrameSink`][framecast_middleware::FrameSink].  The topology is a
//!   data table of [`EdgeSpec`][scene::EdgeSpec] entries.
//! - [`broadcaster`] – [`Broadcaster`][broadcaster::Broadcaster]: the
//!   fixed-period loop (500 ms startup delay, 50 ms period by default)
//!   with watch-channel shutdown.
//! - [`clock`] – [`Clock`][clock::Clock]: injected time source;
//!   [`SystemClock`][clock::SystemClock] for production,
//!   [`ManualClock`][clock::ManualClock] for deterministic tests.
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]: structured
//!   logging bootstrap shared by binaries.

pub mod broadcaster;
pub mod clock;
pub mod scene;
pub mod telemetry;

pub use broadcaster::{BroadcastTiming, Broadcaster, DEFAULT_PERIOD, DEFAULT_STARTUP_DELAY};
pub use clock::{Clock, ManualClock, SystemClock};
pub use scene::{default_topology, EdgeSpec, SceneBuilder, SceneConfig, ScenePoses};
pub use telemetry::init_tracing;
