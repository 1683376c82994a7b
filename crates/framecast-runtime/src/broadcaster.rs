//! Periodic broadcast loop.
//!
//! Waits out a startup delay (downstream consumers need a moment to
//! subscribe), then drives [`SceneBuilder::tick`] at a fixed period until
//! the shutdown signal flips.  One tick runs to completion before the next
//! is scheduled; there is no shared mutable state between cycles.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::scene::SceneBuilder;

// ────────────────────────────────────────────────────────────────────────────
// Timing
// ────────────────────────────────────────────────────────────────────────────

/// Reference cadence: first cycle after 500 ms, then every 50 ms.
pub const DEFAULT_STARTUP_DELAY: Duration = Duration::from_millis(500);
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(50);

/// Cadence of the broadcast loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BroadcastTiming {
    /// Pause before the first cycle.
    pub startup_delay: Duration,
    /// Interval between cycle starts.
    pub period: Duration,
}

impl Default for BroadcastTiming {
    fn default() -> Self {
        Self {
            startup_delay: DEFAULT_STARTUP_DELAY,
            period: DEFAULT_PERIOD,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Broadcaster
// ────────────────────────────────────────────────────────────────────────────

/// Owns a [`SceneBuilder`] and schedules its cycles.
pub struct Broadcaster {
    scene: SceneBuilder,
    timing: BroadcastTiming,
}

impl Broadcaster {
    pub fn new(scene: SceneBuilder, timing: BroadcastTiming) -> Self {
        Self { scene, timing }
    }

    /// Run until `shutdown` carries `true` (or its sender is dropped).
    ///
    /// A failed solve skips that cycle with a warning; the loop keeps
    /// running.  Missed ticks are skipped rather than bursted – a stale
    /// pose snapshot has no value.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            startup_delay_ms = self.timing.startup_delay.as_millis() as u64,
            period_ms = self.timing.period.as_millis() as u64,
            "starting broadcast loop"
        );

        tokio::select! {
            _ = tokio::time::sleep(self.timing.startup_delay) => {}
            _ = shutdown_requested(&mut shutdown) => {
                info!("broadcast loop stopped before first cycle");
                return;
            }
        }

        let mut ticker = tokio::time::interval(self.timing.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(e) = self.scene.tick() {
                        warn!(error = %e, "scene solve failed; skipping cycle");
                    }
                }
                _ = shutdown_requested(&mut shutdown) => break,
            }
        }
        info!("broadcast loop stopped");
    }
}

/// Resolves once shutdown is requested: the watch value turns `true`, or
/// the sender side is dropped entirely.
async fn shutdown_requested(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if *shutdown.borrow() {
            return;
        }
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}
