//! Log subscriber setup.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{LogFormat, LoggingSection};

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// results.
///
/// `RUST_LOG` wins over the configured level; `verbose` forces `debug`.
pub fn init(config: &LoggingSection, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let registry = Registry::default().with(filter);
    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer().json().with_target(true).with_writer(std::io::stderr);
            registry.with(layer).init();
        }
        LogFormat::Human => {
            let layer = fmt::layer().with_target(false).with_writer(std::io::stderr);
            registry.with(layer).init();
        }
    }
}
