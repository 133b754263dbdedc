//! # hol-time
//!
//! Date algebra for holiday resolution: civil dates, weekdays and months,
//! Easter, nth-weekday-of-month, weekend-observance shifts, and the
//! business-day `Calendar` trait.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Calendar trait and business-day conventions.
pub mod calendar;

/// `Date` type.
pub mod date;

/// Easter Sunday and offsets from it.
pub mod easter;

/// Month of the year.
pub mod month;

/// Weekend-observance policies.
pub mod observance;

/// Day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{BusinessDayConvention, Calendar, WeekendsOnly};
pub use date::{days_in_month, is_leap_year, Date};
pub use easter::{easter_offset, easter_sunday};
pub use month::Month;
pub use observance::ObservancePolicy;
pub use weekday::Weekday;
