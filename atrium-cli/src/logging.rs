//! Tracing subscriber initialisation.
//!
//! Logs go to stderr so rendered HTML on stdout stays clean.
//!
//! | Flag(s)   | Filter level |
//! |-----------|--------------|
//! | (none)    | INFO         |
//! | `-v`      | DEBUG        |
//! | `-vv`     | TRACE        |
//! | `--quiet` | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init_tracing(verbose: u8, quiet: bool) {
    let level = derive_level(verbose, quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn derive_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}
