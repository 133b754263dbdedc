//! Resolved holidays: [`HolidayRecord`] and the date-keyed [`HolidaySet`].
//!
//! A `HolidaySet` is an ordered map from the holiday's true date to its
//! record. It is the only data contract consumers depend on; everything
//! upstream of it (rules, rule sets) is an input description.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use hol_core::{LanguageCode, SubdivisionCode};
use hol_time::Date;

/// A single resolved holiday occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HolidayRecord {
    /// Canonical display name.
    pub name: String,
    /// The true calendar date of the holiday.
    pub date: Date,
    /// Category from the jurisdiction's declared vocabulary (e.g. `"public"`).
    pub category: String,
    /// Translated names keyed by language code.
    pub languages: BTreeMap<LanguageCode, String>,
    /// Day off taken instead of `date` under the weekend-observance policy.
    pub observed_date: Option<Date>,
    /// Regions the holiday is restricted to; empty means nationwide.
    pub subdivisions: BTreeSet<SubdivisionCode>,
}

impl HolidayRecord {
    /// Return the name in `language`, falling back to [`HolidayRecord::name`].
    pub fn name_in(&self, language: &str) -> &str {
        self.languages
            .get(language)
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    /// Return `true` if the holiday applies in every subdivision.
    pub fn is_nationwide(&self) -> bool {
        self.subdivisions.is_empty()
    }

    /// The date the holiday is actually taken: the observed date if the
    /// policy moved it, otherwise the true date.
    pub fn effective_date(&self) -> Date {
        self.observed_date.unwrap_or(self.date)
    }
}

/// Resolved holidays keyed by their true date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HolidaySet {
    data: BTreeMap<Date, HolidayRecord>,
}

impl HolidaySet {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of holidays.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The record whose true date is `date`.
    pub fn get(&self, date: Date) -> Option<&HolidayRecord> {
        self.data.get(&date)
    }

    /// Whether a holiday falls on `date` (true date only).
    pub fn contains(&self, date: Date) -> bool {
        self.data.contains_key(&date)
    }

    /// Whether `date` is a day off: either a holiday's true date or its
    /// observed date.
    pub fn is_holiday(&self, date: Date) -> bool {
        self.contains(date) || self.data.values().any(|r| r.observed_date == Some(date))
    }

    /// The earliest holiday, if any.
    pub fn first(&self) -> Option<&HolidayRecord> {
        self.data.values().next()
    }

    /// The latest holiday, if any.
    pub fn last(&self) -> Option<&HolidayRecord> {
        self.data.values().next_back()
    }

    /// Iterate over `(date, record)` pairs in date order.
    pub fn iter(&self) -> btree_map::Iter<'_, Date, HolidayRecord> {
        self.data.iter()
    }

    /// All true dates, ascending.
    pub fn dates(&self) -> Vec<Date> {
        self.data.keys().copied().collect()
    }

    /// All observed dates (only for holidays the policy moved), ascending.
    pub fn observed_dates(&self) -> Vec<Date> {
        let mut out: Vec<Date> = self.data.values().filter_map(|r| r.observed_date).collect();
        out.sort_unstable();
        out
    }

    /// The holidays whose category is `category`.
    pub fn filter_category(&self, category: &str) -> HolidaySet {
        self.data
            .iter()
            .filter(|(_, r)| r.category == category)
            .map(|(d, r)| (*d, r.clone()))
            .collect()
    }

    // ── Modifiers ────────────────────────────────────────────────────────

    /// Insert a record keyed by its true date, returning the record it
    /// displaced, if any.
    pub fn insert(&mut self, record: HolidayRecord) -> Option<HolidayRecord> {
        self.data.insert(record.date, record)
    }

    /// Return the union of `self` and `other`; on a shared date the record
    /// from `other` wins. Neither input is modified.
    pub fn merged_with(&self, other: &HolidaySet) -> HolidaySet {
        let mut out = self.clone();
        out.extend(other.data.values().cloned());
        out
    }
}

impl Extend<HolidayRecord> for HolidaySet {
    fn extend<I: IntoIterator<Item = HolidayRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<(Date, HolidayRecord)> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = (Date, HolidayRecord)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for HolidaySet {
    type Item = (Date, HolidayRecord);
    type IntoIter = btree_map::IntoIter<Date, HolidayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<'a> IntoIterator for &'a HolidaySet {
    type Item = (&'a Date, &'a HolidayRecord);
    type IntoIter = btree_map::Iter<'a, Date, HolidayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, y: u16, m: u8, d: u8) -> HolidayRecord {
        HolidayRecord {
            name: name.into(),
            date: Date::from_ymd(y, m, d).unwrap(),
            category: "public".into(),
            languages: BTreeMap::new(),
            observed_date: None,
            subdivisions: BTreeSet::new(),
        }
    }

    #[test]
    fn name_fallback() {
        let mut r = record("Christmas Day", 2024, 12, 25);
        r.languages.insert("de".into(), "Weihnachten".into());
        assert_eq!(r.name_in("de"), "Weihnachten");
        assert_eq!(r.name_in("fr"), "Christmas Day");
        assert!(r.is_nationwide());
    }

    #[test]
    fn observed_dates_count_as_holidays() {
        let mut r = record("Juneteenth", 2026, 6, 19);
        let mut set = HolidaySet::new();
        assert_eq!(r.effective_date(), r.date);
        r.date = Date::from_ymd(2027, 6, 19).unwrap(); // Saturday
        r.observed_date = Some(Date::from_ymd(2027, 6, 18).unwrap());
        set.insert(r);
        assert!(set.is_holiday(Date::from_ymd(2027, 6, 18).unwrap()));
        assert!(!set.contains(Date::from_ymd(2027, 6, 18).unwrap()));
        assert_eq!(set.observed_dates(), vec![Date::from_ymd(2027, 6, 18).unwrap()]);
    }

    #[test]
    fn merge_prefers_other() {
        let mut a = HolidaySet::new();
        a.insert(record("A", 2024, 1, 1));
        a.insert(record("B", 2024, 5, 1));
        let mut b = HolidaySet::new();
        b.insert(record("C", 2024, 5, 1));
        let merged = a.merged_with(&b);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(Date::from_ymd(2024, 5, 1).unwrap()).unwrap().name, "C");
        // inputs untouched
        assert_eq!(a.get(Date::from_ymd(2024, 5, 1).unwrap()).unwrap().name, "B");
        assert_eq!(merged.first().unwrap().name, "A");
        assert_eq!(merged.last().unwrap().name, "C");
    }

    #[test]
    fn insert_returns_displaced() {
        let mut set = HolidaySet::new();
        assert!(set.insert(record("First", 2024, 12, 25)).is_none());
        let old = set.insert(record("Second", 2024, 12, 25)).unwrap();
        assert_eq!(old.name, "First");
        assert_eq!(set.len(), 1);
    }
}
