//! `framecast` – fixed-scene transform broadcaster.
//!
//! Boots structured logging, loads the optional config file, wires the
//! frame bus to the scene broadcaster, and runs until Ctrl-C:
//!
//! 1. `base_frame → object_frame` and `base_frame → robot_frame` are
//!    constant poses.
//! 2. `robot_frame → camera_frame` is re-solved every cycle so the camera's
//!    x axis points at the object origin.
//!
//! Set `RUST_LOG=debug` to see every published edge on the console.

mod config;

use std::sync::Arc;

use framecast_middleware::FrameBus;
use framecast_runtime::{init_tracing, Broadcaster, SceneBuilder, SystemClock};
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() {
    init_tracing();

    // ── Configuration ─────────────────────────────────────────────────────
    let mut cfg = match config::load() {
        Ok(Some(cfg)) => {
            info!(path = %config::config_path().display(), "config loaded");
            cfg
        }
        Ok(None) => {
            info!("no config file; using reference defaults");
            config::Config::default()
        }
        Err(e) => {
            warn!(error = %e, "config unreadable; using reference defaults");
            config::Config::default()
        }
    };
    config::apply_env_overrides(&mut cfg);

    // ── Bus and console subscriber ────────────────────────────────────────
    let bus = FrameBus::default();

    // Debug subscriber so a bare run shows the live stream.
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(edge) => debug!(
                    parent = %edge.parent_frame,
                    child = %edge.child_frame,
                    x = edge.translation.x,
                    y = edge.translation.y,
                    z = edge.translation.z,
                    stamp = %edge.stamp,
                    "frame edge"
                ),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(lagged_by = n, "edge subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // ── Scene and broadcast loop ──────────────────────────────────────────
    let scene = SceneBuilder::new(
        cfg.scene.clone(),
        Arc::new(bus.clone()),
        Arc::new(SystemClock),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let loop_handle = tokio::spawn(Broadcaster::new(scene, cfg.timing()).run(shutdown_rx));

    // ── Ctrl-C ────────────────────────────────────────────────────────────
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received; shutting down"),
        Err(e) => error!(error = %e, "failed to listen for Ctrl-C; shutting down"),
    }
    let _ = shutdown_tx.send(true);
    let _ = loop_handle.await;
    info!("framecast stopped");
}
