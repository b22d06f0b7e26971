use std::{
    fs::{self, OpenOptions},
    io::{self, Stderr},
    path::Path,
};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Boxed layer, чтобы стереть конкретный тип формата (json/pretty/compact).
pub type BoxedLayer<S> = Box<dyn LayerTrait<S> + Send + Sync>;

/// Консольный layer. Пишет в stderr: stdout занят результатами CLI.
pub fn console_layer<S>(config: &LoggingConfig) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer: fn() -> Stderr = io::stderr;
    build_layer(config.format, writer, config.with_ansi, config.with_target)
}

/// Файловый layer через неблокирующий writer `tracing-appender`.
///
/// Файл открывается на дозапись, родительский каталог создаётся. Guard
/// должен жить дольше подписчика, иначе буферизованные события теряются.
pub fn file_layer<S>(
    config: &LoggingConfig,
    path: &Path,
) -> io::Result<(BoxedLayer<S>, WorkerGuard)>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);

    // Файлы всегда без ANSI и с target.
    let layer = build_layer::<S, NonBlocking>(config.format, writer, false, true);
    Ok((layer, guard))
}

fn build_layer<S, W>(
    format: LogFormat,
    writer: W,
    with_ansi: bool,
    with_target: bool,
) -> BoxedLayer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => Box::new(
            fmt::layer()
                .event_format(fmt::format().json().with_current_span(true))
                .with_writer(writer)
                .with_ansi(false)
                .with_target(with_target),
        ),
        LogFormat::Pretty => Box::new(
            fmt::layer()
                .event_format(fmt::format().pretty())
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(with_target),
        ),
        LogFormat::Compact => Box::new(
            fmt::layer()
                .event_format(fmt::format().compact())
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(with_target),
        ),
    }
}
