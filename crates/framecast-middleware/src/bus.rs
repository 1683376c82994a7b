//! Headless publish/subscribe channel for frame-transform broadcasts.
//!
//! Uses [`tokio::sync::broadcast`] under the hood so that every subscriber
//! receives every [`FrameEdge`] without any single subscriber blocking the
//! others.  Slow subscribers lag (old edges are dropped for them) rather
//! than stalling the producer; for a stream of pose snapshots, dropping a
//! stale edge is always the right call.

use framecast_types::{FrameEdge, FramecastError};
use tokio::sync::broadcast;
use tracing::warn;

/// Default channel capacity (number of buffered edges before the oldest are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// The sink through which the scene hands off each computed [`FrameEdge`].
///
/// The producer side is fire-and-forget: it never inspects delivery
/// acknowledgments.  [`FrameBus`] is the in-process implementation; tests
/// substitute recording sinks.
pub trait FrameSink: Send + Sync {
    /// Hand one edge to the transport.
    ///
    /// Returns the number of receivers the edge reached, or
    /// [`FramecastError::Channel`] when nobody is listening (a normal
    /// condition for a best-effort broadcaster, not a fault).
    fn publish(&self, edge: FrameEdge) -> Result<usize, FramecastError>;
}

/// Shared broadcast bus.  Clone it cheaply – all clones share the same
/// underlying channel.
#[derive(Clone, Debug)]
pub struct FrameBus {
    sender: broadcast::Sender<FrameEdge>,
}

impl FrameBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to the live edge stream.
    ///
    /// The returned receiver yields every edge published after the call.
    /// A receiver that falls more than the channel capacity behind gets a
    /// [`broadcast::error::RecvError::Lagged`] and skips ahead.
    pub fn subscribe(&self) -> broadcast::Receiver<FrameEdge> {
        self.sender.subscribe()
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for FrameBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl FrameSink for FrameBus {
    fn publish(&self, edge: FrameEdge) -> Result<usize, FramecastError> {
        match self.sender.send(edge) {
            Ok(n) => Ok(n),
            Err(broadcast::error::SendError(edge)) => {
                warn!(
                    parent = %edge.parent_frame,
                    child = %edge.child_frame,
                    "no subscribers for frame edge"
                );
                Err(FramecastError::Channel(format!(
                    "no subscribers for {}→{}",
                    edge.parent_frame, edge.child_frame
                )))
            }
        }
    }
}
