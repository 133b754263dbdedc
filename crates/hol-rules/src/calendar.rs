//! Business-day calendar backed by a jurisdiction's resolved holidays.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use hol_core::{SubdivisionCode, Year};
use hol_time::{Calendar, Date};

use crate::jurisdiction::Jurisdiction;
use crate::record::HolidaySet;

/// A [`Calendar`] whose non-business days are weekends plus the holidays of
/// a jurisdiction, observed dates included.
///
/// Holiday sets are resolved lazily, one year at a time, and kept for the
/// lifetime of the calendar.
pub struct JurisdictionCalendar {
    jurisdiction: Arc<Jurisdiction>,
    subdivisions: BTreeSet<SubdivisionCode>,
    name: String,
    years: Mutex<HashMap<Year, Arc<HolidaySet>>>,
}

impl std::fmt::Debug for JurisdictionCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JurisdictionCalendar")
            .field("name", &self.name)
            .field("subdivisions", &self.subdivisions)
            .finish()
    }
}

impl JurisdictionCalendar {
    /// Create a calendar for `jurisdiction`, restricted to `subdivisions`
    /// (empty for nationwide holidays only).
    pub fn new(jurisdiction: Arc<Jurisdiction>, subdivisions: BTreeSet<SubdivisionCode>) -> Self {
        let mut name = jurisdiction.country_code().to_string();
        if !subdivisions.is_empty() {
            let codes: Vec<&str> = subdivisions.iter().map(String::as_str).collect();
            name = format!("{name}-{}", codes.join("+"));
        }
        Self {
            jurisdiction,
            subdivisions,
            name,
            years: Mutex::new(HashMap::new()),
        }
    }

    /// The resolved holidays of `year` for this calendar's subdivisions.
    pub fn holidays(&self, year: Year) -> Arc<HolidaySet> {
        let mut years = self.years.lock().expect("JurisdictionCalendar mutex poisoned");
        years
            .entry(year)
            .or_insert_with(|| {
                Arc::new(
                    self.jurisdiction
                        .regional_holidays(year, &self.subdivisions),
                )
            })
            .clone()
    }
}

impl Calendar for JurisdictionCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        if self.is_weekend(date) {
            return false;
        }
        let year = date.year();
        if self.holidays(year).is_holiday(date) {
            return false;
        }
        // Observed dates can cross a year boundary (Jan 1 on a Saturday
        // observed on Dec 31).
        let neighbour = match date.month() {
            12 => year.checked_add(1),
            1 => year.checked_sub(1),
            _ => None,
        };
        !neighbour.is_some_and(|y| self.holidays(y).is_holiday(date))
    }
}
