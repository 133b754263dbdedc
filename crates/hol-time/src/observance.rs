//! Weekend-observance policies.
//!
//! When a holiday falls on a weekend, many jurisdictions grant the day off on
//! a nearby weekday instead. An [`ObservancePolicy`] maps the true date to that
//! observed date.

use crate::date::Date;
use crate::weekday::Weekday;

/// How a holiday falling on a weekend is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservancePolicy {
    /// Holidays are observed on their true date only.
    #[default]
    None,
    /// Saturday → preceding Friday, Sunday → following Monday.
    NearestWeekday,
    /// Saturday and Sunday → following Monday.
    FollowingMonday,
    /// Sunday → following Monday; Saturday is not shifted.
    SundayToMonday,
}

impl ObservancePolicy {
    /// Return the observed date for a holiday on `date`, or `None` if the
    /// policy does not move it.
    ///
    /// ```
    /// use hol_time::{Date, ObservancePolicy};
    /// // 2026-06-20 is a Saturday
    /// let sat = Date::from_ymd(2026, 6, 20).unwrap();
    /// assert_eq!(
    ///     ObservancePolicy::FollowingMonday.shift(sat),
    ///     Some(Date::from_ymd(2026, 6, 22).unwrap())
    /// );
    /// assert_eq!(ObservancePolicy::None.shift(sat), None);
    /// ```
    pub fn shift(&self, date: Date) -> Option<Date> {
        let days = match (self, date.weekday()) {
            (ObservancePolicy::None, _) => return None,
            (ObservancePolicy::NearestWeekday, Weekday::Saturday) => -1,
            (ObservancePolicy::NearestWeekday, Weekday::Sunday) => 1,
            (ObservancePolicy::FollowingMonday, Weekday::Saturday) => 2,
            (ObservancePolicy::FollowingMonday, Weekday::Sunday) => 1,
            (ObservancePolicy::SundayToMonday, Weekday::Sunday) => 1,
            _ => return None,
        };
        date.add_days(days).ok()
    }

    /// Return `true` if this policy never moves a date.
    pub fn is_none(&self) -> bool {
        matches!(self, ObservancePolicy::None)
    }
}

impl std::fmt::Display for ObservancePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ObservancePolicy::None => "None",
            ObservancePolicy::NearestWeekday => "Saturday to Friday, Sunday to Monday",
            ObservancePolicy::FollowingMonday => "Weekend to Monday",
            ObservancePolicy::SundayToMonday => "Sunday to Monday",
        };
        write!(f, "{s}")
    }
}
