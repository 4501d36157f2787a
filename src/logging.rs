//! Subscriber setup for the `rmfpack` binary.
//!
//! The library only emits `tracing` events; nothing is printed until a
//! subscriber is installed. Logs go to stderr so `-o -` output on stdout
//! stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default level when neither `RUST_LOG` nor `--debug` is given.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Picks the filter directive. Priority: `RUST_LOG` > `--debug` > default.
fn filter(debug_flag: bool) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    }
}

/// Installs the global fmt subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug_flag: bool) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(debug_flag))
        .with_writer(std::io::stderr)
        .with_target(debug_flag)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
    }
}
