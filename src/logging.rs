//! Diagnostic logging using the tracing crate
//!
//! The library only emits `tracing` events. Binaries call [`init`] to print
//! them; output is controlled with the `RUST_LOG` environment variable:
//!
//! ```bash
//! # Watch the confirmation state machine
//! RUST_LOG=cmdutil::confirm=debug cmdutil-demo confirm
//! ```

use tracing_subscriber::{fmt, EnvFilter};

/// Install a compact subscriber on stderr, filtered by `RUST_LOG`
///
/// Defaults to warnings and errors only. Logs never go to stdout, which
/// belongs to prompts and command output.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}
