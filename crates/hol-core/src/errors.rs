//! Error types for holidays-rs.
//!
//! A single `thiserror`-derived enum covers the whole workspace. Rule data
//! problems surface as [`Error::InvalidRule`] when a rule set is built; the
//! resolver itself never fails on validated data. The [`ensure!`],
//! [`invalid_rule!`] and [`fail!`] macros are shorthands for early returns.

use thiserror::Error;

/// The top-level error type used throughout holidays-rs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule is structurally invalid (bad calendar date, out-of-range
    /// weekday ordinal, dangling or cyclic composite reference, ...).
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A function was called with a disallowed argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Date construction or arithmetic out of range.
    #[error("date error: {0}")]
    Date(String),

    /// Two rules resolved to the same date under a strict collision policy.
    #[error("holiday collision on {date}: {first:?} and {second:?}")]
    Collision {
        /// The contested date, ISO formatted.
        date: String,
        /// Name of the record already present.
        first: String,
        /// Name of the record that would overwrite it.
        second: String,
    },

    /// No rule set is registered for the country code.
    #[error("unknown jurisdiction: {0}")]
    UnknownJurisdiction(String),

    /// A rule set is already registered for the country code.
    #[error("jurisdiction already registered: {0}")]
    DuplicateJurisdiction(String),
}

/// Shorthand `Result` type used throughout holidays-rs.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use hol_core::{ensure, errors::Error};
/// fn positive(x: i32) -> hol_core::errors::Result<i32> {
///     ensure!(x > 0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(matches!(positive(-1), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::InvalidRule(...))` immediately.
///
/// # Example
/// ```
/// use hol_core::{invalid_rule, errors::Error};
/// fn check(day: u8) -> hol_core::errors::Result<()> {
///     if day > 31 {
///         invalid_rule!("day {day} out of range");
///     }
///     Ok(())
/// }
/// assert!(check(12).is_ok());
/// assert!(matches!(check(40), Err(Error::InvalidRule(_))));
/// ```
#[macro_export]
macro_rules! invalid_rule {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::InvalidRule(format!($($msg)*)))
    };
}

/// Return `Err(Error::Date(...))` immediately.
///
/// # Example
/// ```
/// use hol_core::{fail, errors::Error};
/// fn always_err() -> hol_core::errors::Result<()> {
///     fail!("year {} unsupported", 1200);
/// }
/// assert_eq!(always_err(), Err(Error::Date("year 1200 unsupported".into())));
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Date(format!($($msg)*)))
    };
}
