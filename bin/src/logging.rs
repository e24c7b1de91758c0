//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter settings read from the environment.
#[derive(Debug, Clone)]
pub(crate) struct LoggingConfig {
    pub(crate) log_level: String,
}

impl LoggingConfig {
    /// `RUST_LOG`, then `LOG_LEVEL`, then `info`.
    pub(crate) fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let log_level = ["RUST_LOG", "LOG_LEVEL"]
            .into_iter()
            .find_map(|k| get(k).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| "info".to_string());
        Self { log_level }
    }
}

/// Install the global subscriber. Logs go to stderr; stdout carries reports.
pub(crate) fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
