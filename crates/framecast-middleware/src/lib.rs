//! `framecast-middleware` – transport between the scene solver and its
//! consumers.
//!
//! Routes computed [`FrameEdge`][framecast_types::FrameEdge] records from
//! the producer to any number of subscribers without caring what the poses
//! mean.
//!
//! # Modules
//!
//! - [`bus`] – [`FrameBus`]: Tokio broadcast-channel pub/sub, plus the
//!   [`FrameSink`] trait that the broadcast loop publishes through so the
//!   transport stays an injected dependency rather than a process-wide
//!   handle.

pub mod bus;

pub use bus::{FrameBus, FrameSink};
