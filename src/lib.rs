//! Компактные множества целых чисел для списков кадров рендера.
//!
//! [`IntegerSequence`] хранит множество `i64` и отдаёт его как отсортированные
//! непересекающиеся интервалы, например `"1-10,13,15-30"`.
//!
//! ```
//! use frameseq::IntegerSequence;
//!
//! let mut seq = IntegerSequence::from_string("1-10,13,15-30:5").unwrap();
//! seq.add_integer(11).unwrap();
//! assert_eq!(seq.to_string(), "1-11,13,15,20,25,30");
//! assert_eq!(seq.count(), 16);
//! ```

/// Parsing and rendering of range strings.
pub mod codec;
/// Settings loading (defaults, TOML file, environment).
pub mod config;
/// Deadline frame-list syntax on top of the core parser.
pub mod deadline;
/// Error types of the sequence and its settings.
pub mod error;
/// Tracing subscriber setup (filter, console and file layers).
pub mod logging;
/// The integer set itself plus the interval merge machinery.
pub mod sequence;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Range-string codec entry points.
pub use codec::{integer_string, parse_token, parse_tokens, ranges_in_str, RangeToken};
/// Configuration.
pub use self::config::{DisplaySettings, Settings};
/// Errors.
pub use error::{SequenceError, SettingsError, TokenFault};
/// Cross-crate error plumbing.
pub use frameseq_error::{FrameseqResult, StackError, StatusCode};
/// Logging.
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingHandle};
/// The sequence and its iterators.
pub use sequence::{IntegerSequence, Integers, Interval, Ranges};
