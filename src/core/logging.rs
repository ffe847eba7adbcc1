//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events, tagged with a bracketed
//! subsystem prefix (`[SESSION]`, `[API]`, ...). Installing a subscriber is
//! the binary's job.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when `verbose`.
/// Calling it twice is harmless (the second install is ignored).
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
