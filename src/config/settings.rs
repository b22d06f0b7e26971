use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::SettingsError, logging::LoggingConfig};

/// Префикс переменных окружения: `FRAMESEQ_DISPLAY__MAX_LENGTH=80`.
pub const ENV_PREFIX: &str = "FRAMESEQ";

/// Лимит длины строки диапазонов по умолчанию: без усечения, чтобы вывод
/// разбирался обратно.
pub const DEFAULT_MAX_LENGTH: usize = 0;

/// Параметры отображения строк диапазонов.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// `0` disables truncation.
    pub max_length: usize,
    /// Minimum width of each rendered number, padded with leading zeros.
    pub zero_pad: usize,
}

/// Настройки приложения.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub logging: LoggingConfig,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            zero_pad: 0,
        }
    }
}

impl Settings {
    /// Загружает настройки из значений по умолчанию и окружения.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Defaults, then the TOML file at `path` (which must exist when given),
    /// then `FRAMESEQ_*` environment variables.
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            // Adding default values
            .set_default("display.max_length", defaults.display.max_length as i64)?
            .set_default("display.zero_pad", defaults.display.zero_pad as i64)?
            .set_default("logging.level", defaults.logging.level.clone())?;

        if let Some(path) = path {
            debug!(path = %path.display(), "loading settings file");
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Deserialize the configuration into our structure.
        let settings: Settings = cfg.try_deserialize()?;
        settings
            .logging
            .validate()
            .map_err(|e| SettingsError(config::ConfigError::Message(e)))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, io::Write};

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::logging::LogFormat;

    fn clear_env() {
        for key in [
            "FRAMESEQ_DISPLAY__MAX_LENGTH",
            "FRAMESEQ_DISPLAY__ZERO_PAD",
            "FRAMESEQ_LOGGING__LEVEL",
            "FRAMESEQ_LOGGING__FORMAT",
        ] {
            env::remove_var(key);
        }
    }

    fn toml_file(body: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    /// Тест проверяет значения по умолчанию без файла и окружения.
    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::load().unwrap();
        assert_eq!(settings.display.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(settings.display.zero_pad, 0);
        assert_eq!(settings.logging, LoggingConfig::default());
    }

    /// Тест проверяет, что строка по умолчанию не усекается и разбирается
    /// обратно в ту же последовательность.
    #[test]
    #[serial]
    fn test_default_display_is_lossless() {
        clear_env();
        let settings = Settings::load().unwrap();
        assert_eq!(settings.display.max_length, 0);

        let mut seq = crate::IntegerSequence::from_string("1-1000:7").unwrap();
        let text = seq.get_integer_string(settings.display.max_length, settings.display.zero_pad);
        assert!(!text.contains("..."));
        let mut back = crate::IntegerSequence::from_string(&text).unwrap();
        assert_eq!(back.count(), 143);
        assert_eq!(back.as_ranges(), seq.as_ranges());
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        clear_env();
        let file = toml_file(
            r#"
[display]
zero_pad = 4

[logging]
level = "debug"
format = "json"
"#,
        );
        let settings = Settings::load_from(Some(file.path())).unwrap();
        assert_eq!(settings.display.zero_pad, 4);
        assert_eq!(settings.display.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, LogFormat::Json);
    }

    /// Тест проверяет, что окружение перекрывает файл.
    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let file = toml_file("[display]\nmax_length = 10\n");
        env::set_var("FRAMESEQ_DISPLAY__MAX_LENGTH", "80");
        let settings = Settings::load_from(Some(file.path()));
        clear_env();
        assert_eq!(settings.unwrap().display.max_length, 80);
    }

    #[test]
    #[serial]
    fn test_missing_file_is_error() {
        clear_env();
        let err = Settings::load_from(Some(Path::new("/nonexistent/frameseq.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("configuration error"));
    }

    #[test]
    #[serial]
    fn test_invalid_level_rejected() {
        clear_env();
        env::set_var("FRAMESEQ_LOGGING__LEVEL", "loud");
        let res = Settings::load();
        clear_env();
        assert!(res.is_err());
    }
}
