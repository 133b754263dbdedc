//! `Date`: a civil calendar date with no time of day and no time zone.
//!
//! Dates are stored as a day number relative to 1970-01-01 on the proleptic
//! Gregorian calendar, which makes day arithmetic and weekday computation
//! constant-time.
//!
//! # Range
//! * The valid date range is 0001-01-01 to 9999-12-31.
//! * Ecclesiastical computations (Easter) are meaningful from 1583 onward.

use crate::month::Month;
use crate::weekday::Weekday;
use hol_core::errors::{Error, Result};
use hol_core::{fail, Year};

/// A civil calendar date represented as a day number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

/// First representable year.
pub const MIN_YEAR: Year = 1;

/// Last representable year.
pub const MAX_YEAR: Year = 9999;

impl Date {
    /// Minimum valid date: January 1, 0001.
    pub const MIN: Date = Date(days_from_civil(MIN_YEAR as i32, 1, 1));

    /// Maximum valid date: December 31, 9999.
    pub const MAX: Date = Date(days_from_civil(MAX_YEAR as i32, 12, 31));

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: Year, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            fail!("year {year} out of range [{MIN_YEAR}, {MAX_YEAR}]");
        }
        if !(1..=12).contains(&month) {
            fail!("month {month} out of range [1, 12]");
        }
        let days_in = days_in_month(year, month);
        if day == 0 || day > days_in {
            fail!("day {day} out of range [1, {days_in}] for {year}-{month:02}");
        }
        Ok(Self::from_ymd_unchecked(year, month, day))
    }

    /// Create a date from components already known to be valid.
    pub(crate) fn from_ymd_unchecked(year: Year, month: u8, day: u8) -> Self {
        debug_assert!(
            (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month),
            "invalid date {year}-{month}-{day}"
        );
        Date(days_from_civil(year as i32, month as u32, day as u32))
    }

    /// Create a date from its day number (days since 1970-01-01).
    pub fn from_day_number(n: i32) -> Result<Self> {
        let d = Date(n);
        if d < Self::MIN || d > Self::MAX {
            fail!("day number {n} out of range");
        }
        Ok(d)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the day number (days since 1970-01-01, negative before it).
    pub fn day_number(&self) -> i32 {
        self.0
    }

    /// Return the `(year, month, day)` triple.
    pub fn ymd(&self) -> (Year, u8, u8) {
        civil_from_days(self.0)
    }

    /// Return the year.
    pub fn year(&self) -> Year {
        self.ymd().0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Return the month as a [`Month`].
    pub fn month_of_year(&self) -> Month {
        Month::from_number(self.month()).expect("civil month always in 1..=12")
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Return the day of the year (1–366).
    pub fn day_of_year(&self) -> u16 {
        let jan1 = days_from_civil(self.year() as i32, 1, 1);
        (self.0 - jan1 + 1) as u16
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday (ordinal 4).
        let w = ((self.0 + 3).rem_euclid(7) + 1) as u8;
        Weekday::from_ordinal(w).expect("rem_euclid always in 1..=7")
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days. Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        match self.0.checked_add(n) {
            Some(serial) if serial >= Self::MIN.0 && serial <= Self::MAX.0 => Ok(Date(serial)),
            _ => fail!("date arithmetic: {self} {n:+} days out of range"),
        }
    }

    /// Return the number of calendar days between `self` and `other`.
    /// Positive if `other > self`.
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Return the last day of the month containing this date.
    pub fn end_of_month(self) -> Self {
        let (y, m, _) = self.ymd();
        Self::from_ymd_unchecked(y, m, days_in_month(y, m))
    }

    /// Return `true` if this is the last calendar day of its month.
    pub fn is_end_of_month(self) -> bool {
        self == self.end_of_month()
    }

    /// Return the `n`-th occurrence of `weekday` in `month` of `year`.
    ///
    /// * `n >= 1` counts from the first day of the month, so
    ///   `nth_weekday(2024, 10, Weekday::Monday, 4)` is 2024-10-28.
    /// * `n == -1` selects the last occurrence in the month.
    ///
    /// # Errors
    /// * [`Error::InvalidArgument`] if `n == 0` or `n < -1`. This signals a
    ///   defect in the caller's data, not a recoverable runtime condition;
    ///   rule sets reject such ordinals before resolution.
    /// * [`Error::Date`] if the year or month is out of range, or the month
    ///   has no `n`-th such weekday (e.g. a fifth Wednesday).
    pub fn nth_weekday(year: Year, month: u8, weekday: Weekday, n: i8) -> Result<Self> {
        hol_core::ensure!(
            n >= 1 || n == -1,
            "nth_weekday: n must be >= 1 or -1, got {n}"
        );
        let first = Date::from_ymd(year, month, 1)?;
        let target = weekday.ordinal() as i32;
        if n == -1 {
            let last = first.end_of_month();
            let back = (last.weekday().ordinal() as i32 - target).rem_euclid(7);
            return Ok(Date(last.0 - back));
        }
        // Days to advance from the 1st to reach the first occurrence
        let skip = (target - first.weekday().ordinal() as i32).rem_euclid(7);
        let day = 1 + skip + 7 * (n as i32 - 1);
        if day > days_in_month(year, month) as i32 {
            fail!("nth_weekday: {n}-th {weekday} does not exist in {year}-{month:02}");
        }
        Ok(Date(first.0 + day - 1))
    }
}

// ── Arithmetic operators ──────────────────────────────────────────────────────

impl std::ops::Add<i32> for Date {
    type Output = Self;
    fn add(self, rhs: i32) -> Self {
        self.add_days(rhs).expect("date addition overflow")
    }
}

impl std::ops::Sub<i32> for Date {
    type Output = Self;
    fn sub(self, rhs: i32) -> Self {
        self.add_days(-rhs).expect("date subtraction underflow")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::ops::AddAssign<i32> for Date {
    fn add_assign(&mut self, rhs: i32) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign<i32> for Date {
    fn sub_assign(&mut self, rhs: i32) {
        *self = *self - rhs;
    }
}

// ── Display / parsing ─────────────────────────────────────────────────────────

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Date({self})")
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    /// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('-').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            fail!("malformed date {s:?}, expected YYYY-MM-DD");
        }
        let parse = |p: &str| {
            p.parse::<u16>()
                .map_err(|_| Error::Date(format!("malformed date {s:?}")))
        };
        let (y, m, d) = (parse(parts[0])?, parse(parts[1])?, parse(parts[2])?);
        if m > 12 || d > 31 {
            fail!("malformed date {s:?}");
        }
        Date::from_ymd(y, m as u8, d as u8)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: Year) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year.
pub fn days_in_month(year: Year, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => unreachable!(),
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
///
/// Eras are 400-year blocks starting on March 1 so that the leap day falls at
/// the end of the computational year.
const fn days_from_civil(y: i32, m: u32, d: u32) -> i32 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = (y - era * 400) as u32; // [0, 399]
    let mp = if m > 2 { m - 3 } else { m + 9 }; // [0, 11]
    let doy = (153 * mp + 2) / 5 + d - 1; // [0, 365]
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // [0, 146096]
    era * 146_097 + doe as i32 - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(z: i32) -> (Year, u8, u8) {
    let z = z + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = (z - era * 146_097) as u32; // [0, 146096]
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365; // [0, 399]
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = yoe as i32 + era * 400 + i32::from(m <= 2);
    (y as Year, m as u8, d as u8)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
