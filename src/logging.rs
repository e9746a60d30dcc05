use std::sync::OnceLock;

use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceLock<()> = OnceLock::new();

/// Install the stderr tracing subscriber. `RUST_LOG` takes precedence over
/// `verbose`. Safe to call multiple times.
pub fn init(verbose: bool) {
    LOGGING.get_or_init(|| {
        let fallback = if verbose { "debug" } else { "warn" };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .finish();
        // a subscriber may already be installed (tests)
        tracing::subscriber::set_global_default(subscriber).ok();
    });
}
