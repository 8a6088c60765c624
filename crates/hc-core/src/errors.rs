//! Error types for holiday-cn.
//!
//! A single `thiserror`-derived enum covers every fallible boundary of the
//! workspace: date construction, configuration, file I/O, JSON, and the
//! announcement source. Text parsing itself never fails; malformed clauses
//! are skipped by the parser and reported as anomalies instead.

use thiserror::Error;

/// The top-level error type used throughout holiday-cn.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by `fail!`).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (raised by `ensure!`).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Date-related error: out-of-range components or arithmetic overflow.
    #[error("date error: {0}")]
    Date(String),

    /// A literal could not be parsed.
    #[error("cannot parse {input:?}: {reason}")]
    Parse {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Filesystem failure while reading or writing data files.
    #[error("io error: {0}")]
    Io(String),

    /// JSON (de)serialisation failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The announcement source could not deliver an index or a paper.
    #[error("source error: {0}")]
    Source(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Shorthand `Result` type used throughout holiday-cn.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with `Error::Precondition` when `$cond` is false.
///
/// # Example
/// ```
/// use hc_core::{ensure, errors::Error};
/// fn positive(x: i32) -> hc_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Error::Runtime` immediately.
///
/// # Example
/// ```
/// use hc_core::{fail, errors::Error};
/// fn always_err() -> hc_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert_eq!(always_err(), Err(Error::Runtime("something went wrong".into())));
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_keep_their_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io.into();
        assert_eq!(err, Error::Io("no such file".into()));
        assert_eq!(err.to_string(), "io error: no such file");
    }

    #[test]
    fn json_errors_become_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(Error::from(bad), Error::Serialization(_)));
    }

    #[test]
    fn parse_error_display() {
        let err = Error::Parse {
            input: "2019-13-01".into(),
            reason: "month out of range".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot parse \"2019-13-01\": month out of range"
        );
    }
}
