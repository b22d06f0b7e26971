use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

/// Собирает `EnvFilter`: `RUST_LOG`, если задана, иначе директива из конфига.
pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => filter_from_directive(&config.build_filter_directive()),
    }
}

/// Директива из конфига; при ошибке разбора остаётся `warn`.
pub(crate) fn filter_from_directive(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        // The subscriber is not installed yet, so tracing cannot report this.
        eprintln!("Invalid log filter directive '{directive}': {e}; falling back to 'warn'");
        EnvFilter::new("warn")
    })
}
