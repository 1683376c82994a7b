//! Structured-logging bootstrap.
//!
//! Call [`init_tracing`] once at process startup.
//!
//! # Environment variables
//!
//! | Variable | Effect |
//! |---|---|
//! | `RUST_LOG` | Log filter (default `"info"`). |
//! | `FRAMECAST_LOG_FORMAT=json` | Emit newline-delimited JSON logs. |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global `tracing` subscriber.
///
/// Honours `RUST_LOG` for filtering and `FRAMECAST_LOG_FORMAT=json` for
/// machine-readable output; defaults to a compact console formatter at
/// `info` level.  Calling this a second time in one process is an error
/// (the global subscriber can only be set once), so binaries call it first
/// thing in `main`.
pub fn init_tracing() {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    if json_format_requested() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

/// `true` when `FRAMECAST_LOG_FORMAT=json` is set.
fn json_format_requested() -> bool {
    std::env::var("FRAMECAST_LOG_FORMAT").as_deref() == Ok("json")
}
