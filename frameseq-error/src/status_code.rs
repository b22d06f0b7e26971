use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 1xxx: Общие ошибки
/// - 2xxx: Ошибки данных (неверный тип или значение)
/// - 5xxx: Конфигурация
/// - 6xxx: Ввод/вывод
/// - 8xxx: Разбор строк диапазонов
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 1xxx: Общие ошибки ===
    Internal = 1003,
    InvalidArgs = 1004,

    // === 2xxx: Ошибки данных ===
    TypeError = 2002,
    ValueOutOfRange = 2006,

    // === 5xxx: Конфигурация ===
    ConfigError = 5000,
    ConfigNotFound = 5001,

    // === 6xxx: Ввод/вывод ===
    Io = 6000,
    NotFound = 6001,
    PermissionDenied = 6002,
    UnexpectedEof = 6003,

    // === 8xxx: Разбор ===
    MalformedToken = 8001,
    InvalidInteger = 8002,
    InvalidStep = 8003,
}

/// Уровень, с которым ошибку стоит записать в лог.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Ошибка разбора строки диапазона (8xxx).
    pub fn is_parse_error(&self) -> bool {
        (8000..=8999).contains(&self.code())
    }

    /// Ошибки окружения: конфигурация и ввод/вывод (5xxx..6xxx).
    pub fn is_environment_error(&self) -> bool {
        matches!(self.code(), 5000..=6999)
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::MalformedToken
            | Self::InvalidInteger
            | Self::InvalidStep
            | Self::TypeError
            | Self::ValueOutOfRange
            | Self::InvalidArgs => LogLevel::Info,
            Self::ConfigNotFound => LogLevel::Debug,
            Self::Internal => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }

    /// Код завершения процесса для CLI (в духе `sysexits.h`).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgs => 64,
            Self::TypeError
            | Self::ValueOutOfRange
            | Self::MalformedToken
            | Self::InvalidInteger
            | Self::InvalidStep => 65,
            Self::NotFound => 66,
            Self::Io | Self::PermissionDenied | Self::UnexpectedEof => 74,
            Self::ConfigError | Self::ConfigNotFound => 78,
            _ => 70,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
