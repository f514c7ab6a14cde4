//! Journal initialization

use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Console output goes to
/// stderr so it never interleaves with the status line on stdout.
pub fn init_journal(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    match tracing_journald::layer().ok() {
        Some(journal) => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .with(journal)
                .try_init()?;
            debug!("Logging initialized with systemd journald");
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(console)
                .try_init()?;
            debug!("Logging initialized with console output (journald not available)");
        }
    }

    Ok(())
}
