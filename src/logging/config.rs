use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

/// Допустимые уровни логирования.
pub const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Формат вывода событий в консоль.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for this crate's targets (`off`..`trace`).
    pub level: String,
    /// Extra `EnvFilter` directives appended after the base level,
    /// e.g. `"frameseq::codec=trace"`.
    pub directives: Vec<String>,
    pub format: LogFormat,
    pub with_ansi: bool,
    pub with_target: bool,
    /// When set, events are also appended to this file (no ANSI).
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directives: Vec::new(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Проверяет уровень и путь к файлу.
    pub fn validate(&self) -> Result<(), String> {
        if !LEVELS.contains(&self.level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "invalid log level '{}', expected one of: {}",
                self.level,
                LEVELS.join(", ")
            ));
        }
        if let Some(path) = &self.file {
            if path.as_os_str().is_empty() || path.file_name().is_none() {
                return Err(format!("invalid log file path '{}'", path.display()));
            }
        }
        Ok(())
    }

    /// Строит директиву для `EnvFilter`: `"frameseq=info,frameseq_error=info,..."`.
    pub fn build_filter_directive(&self) -> String {
        let level = self.level.to_ascii_lowercase();
        let mut parts = vec![format!("frameseq={level}"), format!("frameseq_cli={level}")];
        parts.extend(self.directives.iter().cloned());
        parts.join(",")
    }

    /// `-v` / `-q` из командной строки перекрывают уровень из настроек.
    pub fn with_verbosity(
        mut self,
        verbose: bool,
        quiet: bool,
    ) -> Self {
        if quiet {
            self.level = "off".to_string();
        } else if verbose {
            self.level = "debug".to_string();
        }
        self
    }
}

impl fmt::Display for LogFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let name = match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
            LogFormat::Compact => "compact",
        };
        f.write_str(name)
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}'")),
        }
    }
}
