//! `Calendar` trait and business-day conventions.
//!
//! A calendar knows which dates are business days and can roll dates that
//! land on a holiday according to a [`BusinessDayConvention`]. Jurisdiction
//! calendars backed by resolved holiday sets live in `hol-rules`.

use crate::date::Date;

/// How to adjust a date that falls on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BusinessDayConvention {
    /// Keep the original date.
    Unadjusted,
    /// First business day after the holiday.
    Following,
    /// First business day after the holiday, unless that crosses into the
    /// next month; then the first business day before it.
    ModifiedFollowing,
    /// First business day before the holiday.
    Preceding,
    /// First business day before the holiday, unless that crosses into the
    /// previous month; then the first business day after it.
    ModifiedPreceding,
    /// Nearest business day, ties going forward.
    Nearest,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Nearest => "Nearest",
        };
        write!(f, "{s}")
    }
}

/// A business-day calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name (e.g. `"DE-BY"`).
    fn name(&self) -> &str;

    /// Return `true` if `date` is a business day in this calendar.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a holiday (non-business) day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` is a weekend according to this calendar.
    ///
    /// The default treats Saturday and Sunday as the weekend.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Return the last business day of the month containing `date`.
    fn end_of_month(&self, date: Date) -> Date {
        self.roll(date.end_of_month(), -1)
    }

    /// Step from `date` by `step` days until a business day is reached.
    /// Stops at the edge of the date range.
    fn roll(&self, date: Date, step: i32) -> Date {
        let mut d = date;
        while self.is_holiday(d) {
            match d.add_days(step) {
                Ok(next) => d = next,
                Err(_) => break,
            }
        }
        d
    }

    /// Adjust `date` according to the given business-day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        if convention == BusinessDayConvention::Unadjusted || self.is_business_day(date) {
            return date;
        }
        let after = self.roll(date, 1);
        let before = self.roll(date, -1);
        let in_month = |d: Date| d.month() == date.month();
        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => after,
            BusinessDayConvention::Preceding => before,
            BusinessDayConvention::ModifiedFollowing if in_month(after) => after,
            BusinessDayConvention::ModifiedFollowing => before,
            BusinessDayConvention::ModifiedPreceding if in_month(before) => before,
            BusinessDayConvention::ModifiedPreceding => after,
            BusinessDayConvention::Nearest if after - date <= date - before => after,
            BusinessDayConvention::Nearest => before,
        }
    }

    /// Advance `date` by `n` business days (backwards if `n < 0`).
    fn advance_business_days(&self, date: Date, n: i32) -> Date {
        let step = n.signum();
        (0..n.unsigned_abs()).fold(date, |d, _| {
            d.add_days(step).map_or(d, |next| self.roll(next, step))
        })
    }

    /// Count the business days in `(from, to]`. Negative if `to < from`.
    fn business_days_between(&self, from: Date, to: Date) -> i32 {
        let (start, end, sign) = if from <= to { (from, to, 1) } else { (to, from, -1) };
        let count = (1..=end - start)
            .filter(|&k| self.is_business_day(start + k))
            .count();
        sign * count as i32
    }

    /// List the non-business days in `[from, to]`, optionally skipping
    /// plain weekends.
    fn holidays_between(&self, from: Date, to: Date, include_weekends: bool) -> Vec<Date> {
        (0..=to - from)
            .map(|k| from + k)
            .filter(|&d| self.is_holiday(d) && (include_weekends || !self.is_weekend(d)))
            .collect()
    }
}

/// A calendar that treats only Saturdays and Sundays as non-business days.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn weekends_only_saturday() {
        let cal = WeekendsOnly;
        // 2023-09-02 is a Saturday
        assert!(!cal.is_business_day(date(2023, 9, 2)));
        assert!(cal.is_business_day(date(2023, 9, 4)));
    }

    #[test]
    fn adjust_conventions() {
        let cal = WeekendsOnly;
        let sat = date(2023, 9, 2);
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Following), date(2023, 9, 4));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Preceding), date(2023, 9, 1));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Nearest), date(2023, 9, 1));
        assert_eq!(cal.adjust(sat, BusinessDayConvention::Unadjusted), sat);
        // 2023-09-30 is a Saturday; Following would leave the month
        let end = date(2023, 9, 30);
        assert_eq!(
            cal.adjust(end, BusinessDayConvention::ModifiedFollowing),
            date(2023, 9, 29)
        );
        // 2023-04-01 is a Saturday; Preceding would leave the month
        assert_eq!(
            cal.adjust(date(2023, 4, 1), BusinessDayConvention::ModifiedPreceding),
            date(2023, 4, 3)
        );
    }

    #[test]
    fn business_days_between() {
        let cal = WeekendsOnly;
        let d1 = date(2023, 9, 4); // Monday
        let d2 = date(2023, 9, 8); // Friday
        // Tue, Wed, Thu, Fri = 4 business days (d1 exclusive)
        assert_eq!(cal.business_days_between(d1, d2), 4);
        assert_eq!(cal.business_days_between(d2, d1), -4);
        assert_eq!(cal.business_days_between(d1, d1), 0);
        assert_eq!(cal.advance_business_days(d1, 0), d1);
        assert_eq!(cal.advance_business_days(d1, -1), date(2023, 9, 1));
        assert_eq!(cal.advance_business_days(d2, 1), date(2023, 9, 11));
        assert_eq!(cal.end_of_month(d1), date(2023, 9, 29));
    }

    #[test]
    fn weekend_listing() {
        let cal = WeekendsOnly;
        let from = date(2023, 9, 1);
        let to = date(2023, 9, 10);
        assert_eq!(cal.holidays_between(from, to, false), Vec::<Date>::new());
        assert_eq!(cal.holidays_between(from, to, true).len(), 4);
    }
}
