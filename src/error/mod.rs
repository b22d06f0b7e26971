use std::any::Any;

use frameseq_error::{ErrorExt, StatusCode};
use thiserror::Error;

/// Почему токен строки диапазона отклонён.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenFault {
    #[error("expected N, A-B or A-B:STEP")]
    Syntax,

    #[error("integer does not fit in 64 bits")]
    IntegerOverflow,

    #[error("step must not be zero")]
    ZeroStep,
}

/// Ошибки `IntegerSequence` и кодека строк диапазонов.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A comma-separated token does not match the range grammar. The whole
    /// parse is rejected and the target sequence is left untouched.
    #[error("invalid range token '{token}': {reason}")]
    MalformedRangeToken { token: String, reason: TokenFault },

    /// A value that is not an integer (or does not fit `i64`) was supplied
    /// where an integer is required.
    #[error("expected {expected}, found {found}")]
    InvalidArgumentType {
        expected: &'static str,
        found: String,
    },
}

/// Ошибка загрузки настроек.
#[derive(Debug, Error)]
#[error("configuration error: {0}")]
pub struct SettingsError(#[from] pub config::ConfigError);

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl SequenceError {
    pub(crate) fn malformed(
        token: &str,
        reason: TokenFault,
    ) -> Self {
        Self::MalformedRangeToken {
            token: token.trim().to_string(),
            reason,
        }
    }

    pub(crate) fn not_an_integer(found: impl Into<String>) -> Self {
        Self::InvalidArgumentType {
            expected: "an integer",
            found: found.into(),
        }
    }

    /// The offending token, for malformed-token errors.
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::MalformedRangeToken { token, .. } => Some(token),
            Self::InvalidArgumentType { .. } => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Интеграция с frameseq-error
////////////////////////////////////////////////////////////////////////////////

impl ErrorExt for SequenceError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRangeToken { reason, .. } => match reason {
                TokenFault::Syntax => StatusCode::MalformedToken,
                TokenFault::IntegerOverflow => StatusCode::InvalidInteger,
                TokenFault::ZeroStep => StatusCode::InvalidStep,
            },
            Self::InvalidArgumentType { .. } => StatusCode::TypeError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorExt for SettingsError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            config::ConfigError::NotFound(_) => StatusCode::ConfigNotFound,
            config::ConfigError::Foreign(_) => StatusCode::Io,
            _ => StatusCode::ConfigError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
