//! Diagnostics setup
//!
//! dotship logs through `tracing`; this module installs the subscriber for
//! the binary. Output goes to stderr so stdout stays free for summaries.
//!
//! `RUST_LOG` wins over everything. Otherwise the level comes from the
//! `-v` / `-q` flags.

use std::env;
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    /// Include the module path of each event
    pub include_target: bool,
    pub use_color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_target: false,
            use_color: true,
        }
    }
}

impl LoggingConfig {
    /// Level selected by the verbosity flags; `quiet` wins over `verbose`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        };
        Self {
            level,
            include_target: verbose > 1,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Filter directive used when `RUST_LOG` is unset.
    pub fn directive(&self) -> String {
        format!("dotship={}", self.level.as_str().to_lowercase())
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = match env::var("RUST_LOG") {
            Ok(spec) if !spec.trim().is_empty() => EnvFilter::new(spec),
            _ => EnvFilter::new(config.directive()),
        };

        // Another subscriber may already be installed (tests, embedding).
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(config.include_target)
                    .with_ansi(config.use_color)
                    .without_time(),
            )
            .try_init();
    });
}
