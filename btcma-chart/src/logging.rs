//! Logger setup.
//!
//! Diagnostics go through `log` to stderr; stage progress is printed
//! separately on stdout. `RUST_LOG` overrides the default level.

use env_logger::{Builder, Env};

/// Level used when `RUST_LOG` is unset.
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the global logger. Safe to call more than once.
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or(DEFAULT_LEVEL))
        .format_timestamp_millis()
        .try_init();
}
