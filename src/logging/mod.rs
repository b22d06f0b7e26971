//! Настройка `tracing` для библиотеки и CLI.

pub mod config;
mod filters;
mod formatter;
pub mod handle;

pub use self::config::{LogFormat, LoggingConfig};
pub use handle::LoggingHandle;

use frameseq_error::{bail, FrameseqResult, GenericError, ResultExt, StackError, StatusCode};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Инициализация логирования с конфигурацией.
///
/// Устанавливает глобальный подписчик: фильтр из `RUST_LOG` или `config`,
/// консольный layer на stderr и файловый layer, если задан `config.file`.
/// Возвращает ошибку, если глобальный подписчик уже установлен.
pub fn init_logging(config: LoggingConfig) -> FrameseqResult<LoggingHandle> {
    if let Err(msg) = config.validate() {
        bail!(StatusCode::ConfigError, msg);
    }

    let env_filter = filters::build_filter_from_config(&config);
    let mut layers = vec![formatter::console_layer(&config)];

    let file_guard = match &config.file {
        Some(path) => {
            let (layer, guard) = formatter::file_layer(&config, path)
                .with_context(|| format!("opening log file '{}'", path.display()))?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| {
            StackError::new(GenericError::new(
                StatusCode::Internal,
                format!("logging already initialized: {e}"),
            ))
        })?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.level,
        format = %config.format,
        file = ?config.file,
        "logging initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}
