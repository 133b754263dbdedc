//! Western (Gregorian) Easter computation.
//!
//! Easter Sunday anchors most movable Christian holidays: Good Friday is
//! Easter − 2, Easter Monday is Easter + 1, Ascension is Easter + 39,
//! Whit Monday is Easter + 50, Corpus Christi is Easter + 60.

use crate::date::{Date, MAX_YEAR, MIN_YEAR};
use hol_core::Year;

/// Return Easter Sunday of `year`.
///
/// Uses the anonymous Gregorian algorithm (Meeus/Jones/Butcher). The result
/// is meaningful for every Gregorian year from 1583 onward and always lies
/// between March 22 and April 25.
///
/// `year` must lie in `MIN_YEAR..=MAX_YEAR`; use [`easter_offset`] when it
/// may not.
///
/// ```
/// use hol_time::{easter_sunday, Date};
/// assert_eq!(easter_sunday(2024), Date::from_ymd(2024, 3, 31).unwrap());
/// ```
pub fn easter_sunday(year: Year) -> Date {
    debug_assert!(
        (MIN_YEAR..=MAX_YEAR).contains(&year),
        "easter_sunday: year {year} out of range"
    );
    let y = year as i32;
    let a = y % 19;
    let b = y / 100;
    let c = y % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd_unchecked(year, month as u8, day as u8)
}

/// Return the date `offset_days` away from Easter Sunday of `year`.
///
/// Returns `None` if `year` or the result lies outside the representable
/// date range.
pub fn easter_offset(year: Year, offset_days: i32) -> Option<Date> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    easter_sunday(year).add_days(offset_days).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::Weekday;

    fn date(y: Year, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn reference_dates() {
        let expected = [
            (1818, 3, 22), // earliest possible
            (1943, 4, 25), // latest possible
            (2000, 4, 23),
            (2019, 4, 21),
            (2024, 3, 31),
            (2025, 4, 20),
            (2026, 4, 5),
            (2027, 3, 28),
            (2038, 4, 25),
        ];
        for (y, m, d) in expected {
            assert_eq!(easter_sunday(y), date(y, m, d), "Easter {y}");
        }
    }

    #[test]
    fn always_sunday() {
        for y in 1583..=2400 {
            assert_eq!(easter_sunday(y).weekday(), Weekday::Sunday, "Easter {y}");
        }
    }

    #[test]
    fn offsets() {
        assert_eq!(easter_offset(2024, -2), Some(date(2024, 3, 29)));
        assert_eq!(easter_offset(2024, 1), Some(date(2024, 4, 1)));
        assert_eq!(easter_offset(2024, 60), Some(date(2024, 5, 30)));
    }

    #[test]
    fn offsets_outside_date_range() {
        assert_eq!(easter_offset(0, 0), None);
        assert_eq!(easter_offset(10_000, 0), None);
        assert_eq!(easter_offset(9999, 300), None);
        assert!(easter_offset(9999, 0).is_some());
    }
}
