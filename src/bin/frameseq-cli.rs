//! CLI для строк диапазонов кадров.
//!
//! Разбирает, упаковывает и печатает списки кадров в каноническом виде
//! (`1-10,13,15-30`), а также понимает синтаксис Deadline (`1-100x5 200`).

use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use frameseq::{
    config::Settings,
    deadline,
    logging::init_logging,
    IntegerSequence, StackError,
};
use frameseq_error::LogLevel;
use serde_json::json;
use tracing::{debug, error, info, warn};

/// Основная структура CLI аргументов
#[derive(Parser)]
#[command(name = "frameseq-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Pack, count and render frame range lists", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Файл настроек (TOML)
    #[arg(
        short,
        long,
        env = "FRAMESEQ_CONFIG",
        help = "Path to a TOML settings file"
    )]
    config: Option<PathBuf>,
    /// Включить подробный вывод (debug)
    #[arg(short, long, help = "Log debug events to stderr")]
    verbose: bool,
    /// Подавить логирование
    #[arg(short, long, help = "Disable logging entirely")]
    quiet: bool,
    /// Формат вывода результатов
    #[arg(long, value_enum, default_value = "pretty")]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

/// Формат вывода CLI
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Человекочитаемый формат
    Pretty,
    /// JSON формат
    Json,
}

/// Строка кадров и её синтаксис.
#[derive(Args, Debug)]
struct SpecArg {
    /// Range list, e.g. `1-10,13,15-30:5`
    #[arg(allow_hyphen_values = true)]
    spec: String,
    /// Interpret SPEC as a Deadline frame list (`1-100x5 200`)
    #[arg(long)]
    deadline: bool,
}

/// Подкоманды CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the packed range string
    #[command(alias = "n")]
    Normalize {
        #[command(flatten)]
        input: SpecArg,
        /// Truncate longer output; 0 disables truncation
        #[arg(long)]
        max_length: Option<usize>,
        /// Zero-pad each number to this width
        #[arg(long)]
        pad: Option<usize>,
    },
    /// Print the number of distinct integers
    Count {
        #[command(flatten)]
        input: SpecArg,
    },
    /// Print the smallest and largest member
    Bounds {
        #[command(flatten)]
        input: SpecArg,
    },
    /// Print every member, one per line
    Expand {
        #[command(flatten)]
        input: SpecArg,
    },
    /// Rewrite a Deadline frame list into canonical range syntax
    Deadline {
        #[arg(allow_hyphen_values = true)]
        spec: String,
    },
    /// Deadline `Frames` value for a host frame range
    Frames {
        #[arg(allow_hyphen_values = true)]
        start: f64,
        #[arg(allow_hyphen_values = true)]
        end: f64,
        #[arg(allow_hyphen_values = true)]
        step: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load_from(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => return report(cli.output, &StackError::from(e)),
    };

    let logging = settings
        .logging
        .clone()
        .with_verbosity(cli.verbose, cli.quiet);
    let handle = match init_logging(logging) {
        Ok(handle) => handle,
        Err(e) => return report(cli.output, &e),
    };

    let code = match run(&cli, &settings) {
        Ok(()) => {
            debug!("command finished");
            ExitCode::SUCCESS
        }
        Err(e) => match e.downcast_ref::<StackError>() {
            Some(stack) => report(cli.output, stack),
            None => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    };

    handle.shutdown();
    code
}

/// Обработчик выполнения команд
fn run(
    cli: &Cli,
    settings: &Settings,
) -> Result<()> {
    debug!(command = ?cli.command, "running command");
    match &cli.command {
        Commands::Normalize {
            input,
            max_length,
            pad,
        } => {
            let mut seq = load_sequence(input)?;
            let max_length = max_length.unwrap_or(settings.display.max_length);
            let pad = pad.unwrap_or(settings.display.zero_pad);
            let text = seq.get_integer_string(max_length, pad);
            match cli.output {
                OutputFormat::Pretty => println!("{text}"),
                OutputFormat::Json => print_json(&json!({
                    "ranges": seq.as_ranges(),
                    "string": text,
                }))?,
            }
        }
        Commands::Count { input } => {
            let count = load_sequence(input)?.count();
            match cli.output {
                OutputFormat::Pretty => println!("{count}"),
                OutputFormat::Json => print_json(&json!({ "count": count }))?,
            }
        }
        Commands::Bounds { input } => {
            let bounds = load_sequence(input)?.get_range();
            match (cli.output, bounds) {
                (OutputFormat::Pretty, Some((min, max))) => println!("{min} {max}"),
                (OutputFormat::Pretty, None) => println!("empty"),
                (OutputFormat::Json, Some((min, max))) => {
                    print_json(&json!({ "min": min, "max": max }))?
                }
                (OutputFormat::Json, None) => print_json(&json!(null))?,
            }
        }
        Commands::Expand { input } => {
            let mut seq = load_sequence(input)?;
            match cli.output {
                OutputFormat::Pretty => {
                    for n in seq.iter_integers() {
                        println!("{n}");
                    }
                }
                OutputFormat::Json => {
                    print_json(&json!(seq.iter_integers().collect::<Vec<_>>()))?
                }
            }
        }
        Commands::Deadline { spec } => {
            let normalized = deadline::normalize_frame_spec(spec);
            match cli.output {
                OutputFormat::Pretty => println!("{normalized}"),
                OutputFormat::Json => print_json(&json!({ "spec": normalized }))?,
            }
        }
        Commands::Frames { start, end, step } => {
            let frames = deadline::format_frame_range(*start, *end, *step)?;
            match cli.output {
                OutputFormat::Pretty => println!("{frames}"),
                OutputFormat::Json => print_json(&json!({ "frames": frames }))?,
            }
        }
    }
    Ok(())
}

fn load_sequence(input: &SpecArg) -> Result<IntegerSequence> {
    let seq = if input.deadline {
        deadline::sequence_from_frame_spec(&input.spec)?
    } else {
        IntegerSequence::from_string(&input.spec).map_err(StackError::from)?
    };
    Ok(seq)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}

/// Печатает ошибку в stderr и возвращает код выхода по её статусу.
fn report(
    output: OutputFormat,
    err: &StackError,
) -> ExitCode {
    log_failure(err);
    match output {
        OutputFormat::Pretty => eprintln!("Error: {}", err.client_message()),
        OutputFormat::Json => match serde_json::to_string_pretty(&err.to_response()) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("Error: {}", err.client_message()),
        },
    }
    ExitCode::from(exit_status(err))
}

/// Пишет полную ошибку (с контекстами и местами вызова) в лог с уровнем,
/// который задаёт её статус.
fn log_failure(err: &StackError) {
    let status = err.status_code();
    match err.log_level() {
        LogLevel::Debug => debug!(%status, error = ?err, "command failed"),
        LogLevel::Info => info!(%status, error = ?err, "command failed"),
        LogLevel::Warn => warn!(%status, error = ?err, "command failed"),
        LogLevel::Error => error!(%status, error = ?err, "command failed"),
    }
}

fn exit_status(err: &StackError) -> u8 {
    u8::try_from(err.exit_code()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use frameseq::{SequenceError, SettingsError};

    use super::*;

    #[test]
    fn test_exit_status_for_bad_spec() {
        let err = StackError::from(IntegerSequence::from_string("1-10:0").unwrap_err());
        assert_eq!(err.log_level(), LogLevel::Info);
        assert_eq!(exit_status(&err), 65);
        assert!(err.downcast_ref::<SequenceError>().is_some());
    }

    #[test]
    fn test_exit_status_for_missing_config() {
        let err = StackError::from(SettingsError(config::ConfigError::NotFound(
            "display".into(),
        )));
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(exit_status(&err), 78);
    }

    /// Тест проверяет, что ошибка логируется на любом уровне без паники.
    #[test]
    fn test_log_failure_every_level() {
        let errors = [
            StackError::from(IntegerSequence::from_string("x").unwrap_err()),
            deadline::format_frame_range(f64::NAN, 1.0, 1.0).unwrap_err(),
            StackError::from(std::io::Error::other("disk gone")),
        ];
        for err in &errors {
            log_failure(err);
        }
    }
}
