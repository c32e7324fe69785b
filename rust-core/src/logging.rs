//! tracing subscriber setup for the command-line tools

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the fmt subscriber
///
/// `RUST_LOG` overrides `default_directives`.
pub fn init(default_directives: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives.into());

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
