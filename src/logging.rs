//! Diagnostic logging
//!
//! Reads `TWIG_LOG` (same syntax as `RUST_LOG`). Defaults to `warn`, or
//! `debug` with `--verbose`. Output goes to stderr so it never mixes with
//! paths printed for scripts.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "TWIG_LOG";

/// Filter directives used when `TWIG_LOG` is unset
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "twig=debug"
    } else {
        "warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // try_init: a subscriber may already be installed in tests
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .compact(),
        )
        .try_init();
}
