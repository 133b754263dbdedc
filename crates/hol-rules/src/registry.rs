//! Process-wide jurisdiction registry and query surface.
//!
//! Rule sets are registered once, usually at start-up; a rule set that failed
//! validation never gets here, since it cannot be constructed. Queries for
//! unknown countries, subdivisions, or categories answer `false` or an empty
//! set rather than an error.
//!
//! Resolved sets are memoised per `(country, year, subdivisions)` when
//! [`hol_core::Settings::cache_enabled`] was set at construction. Entries are
//! written once per key and dropped whenever the country's rules change.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock, RwLock};

use hol_core::errors::{Error, Result};
use hol_core::{CountryCode, Settings, SubdivisionCode, Year};
use tracing::{debug, info, warn};

use crate::calendar::JurisdictionCalendar;
use crate::jurisdiction::Jurisdiction;
use crate::record::HolidaySet;
use crate::rule_set::JurisdictionRuleSet;

type CacheKey = (CountryCode, Year, BTreeSet<SubdivisionCode>);

/// A thread-safe map from country code to [`Jurisdiction`].
#[derive(Debug)]
pub struct Registry {
    jurisdictions: RwLock<HashMap<CountryCode, Arc<Jurisdiction>>>,
    cache: Option<RwLock<HashMap<CacheKey, Arc<HolidaySet>>>>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry, memoising if the settings say so.
    pub fn new() -> Self {
        Self {
            jurisdictions: RwLock::default(),
            cache: Settings::instance()
                .cache_enabled()
                .then(RwLock::default),
        }
    }

    /// Return the process-wide registry.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Register the nationwide rule set of a country.
    ///
    /// # Errors
    /// [`Error::DuplicateJurisdiction`] if the country is already registered.
    pub fn register(&self, rule_set: JurisdictionRuleSet) -> Result<()> {
        let country = normalize(rule_set.country_code());
        let mut map = self.jurisdictions.write().expect("Registry lock poisoned");
        if map.contains_key(&country) {
            return Err(Error::DuplicateJurisdiction(country));
        }
        info!(
            country = %country,
            rules = rule_set.len(),
            observance = %rule_set.observance(),
            "registered jurisdiction"
        );
        map.insert(country, Arc::new(Jurisdiction::new(rule_set)));
        Ok(())
    }

    /// Add a regional layer to an already registered country.
    ///
    /// # Errors
    /// [`Error::UnknownJurisdiction`] if the layer's country is not registered.
    pub fn register_regional(&self, rule_set: JurisdictionRuleSet) -> Result<()> {
        let country = normalize(rule_set.country_code());
        {
            let mut map = self.jurisdictions.write().expect("Registry lock poisoned");
            let current = map
                .get(&country)
                .ok_or_else(|| Error::UnknownJurisdiction(country.clone()))?;
            info!(
                country = %country,
                rules = rule_set.len(),
                subdivisions = rule_set.subdivisions().len(),
                "registered regional rules"
            );
            let next = current.with_regional(rule_set);
            map.insert(country.clone(), Arc::new(next));
        }
        self.invalidate(&country);
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The registered jurisdiction for `country`.
    pub fn jurisdiction(&self, country: &str) -> Option<Arc<Jurisdiction>> {
        self.jurisdictions
            .read()
            .expect("Registry lock poisoned")
            .get(&normalize(country))
            .cloned()
    }

    /// Registered country codes, sorted.
    pub fn countries(&self) -> Vec<CountryCode> {
        let mut out: Vec<CountryCode> = self
            .jurisdictions
            .read()
            .expect("Registry lock poisoned")
            .keys()
            .cloned()
            .collect();
        out.sort();
        out
    }

    /// Nationwide holidays of `country` in `year`; empty if unknown.
    pub fn get_holidays(&self, country: &str, year: Year) -> HolidaySet {
        self.lookup(country, year, BTreeSet::new())
    }

    /// Holidays of `country` in `year` applying in any of `subdivisions`.
    ///
    /// Unsupported codes are dropped with a warning; if none remain the
    /// result is empty. An empty code list is the same as [`get_holidays`].
    ///
    /// [`get_holidays`]: Registry::get_holidays
    pub fn get_regional_holidays<I, S>(
        &self,
        country: &str,
        year: Year,
        subdivisions: I,
    ) -> HolidaySet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(jurisdiction) = self.jurisdiction(country) else {
            return HolidaySet::new();
        };
        let mut requested = 0usize;
        let mut filter = BTreeSet::new();
        for code in subdivisions {
            requested += 1;
            let code = code.as_ref().trim();
            if jurisdiction.is_subdivision_supported(code) {
                filter.insert(code.to_string());
            } else {
                warn!(country, subdivision = code, "unsupported subdivision ignored");
            }
        }
        if requested > 0 && filter.is_empty() {
            return HolidaySet::new();
        }
        self.lookup(country, year, filter)
    }

    /// Whether `country` declares subdivision `code`.
    pub fn is_subdivision_supported(&self, country: &str, code: &str) -> bool {
        self.jurisdiction(country)
            .is_some_and(|j| j.is_subdivision_supported(code))
    }

    /// Whether `country` declares `category`.
    pub fn is_category_supported(&self, country: &str, category: &str) -> bool {
        self.jurisdiction(country)
            .is_some_and(|j| j.is_category_supported(category))
    }

    /// A business-day calendar for `country`, restricted to `subdivisions`
    /// (empty for nationwide). `None` if the country is unknown.
    pub fn calendar<I, S>(&self, country: &str, subdivisions: I) -> Option<JurisdictionCalendar>
    where
        I: IntoIterator<Item = S>,
        S: Into<SubdivisionCode>,
    {
        let jurisdiction = self.jurisdiction(country)?;
        Some(JurisdictionCalendar::new(
            jurisdiction,
            subdivisions.into_iter().map(Into::into).collect(),
        ))
    }

    /// Whether this registry memoises resolved sets.
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drop every memoised result.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.write().expect("Registry cache poisoned").clear();
        }
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn lookup(&self, country: &str, year: Year, filter: BTreeSet<SubdivisionCode>) -> HolidaySet {
        let Some(jurisdiction) = self.jurisdiction(country) else {
            return HolidaySet::new();
        };
        let Some(cache) = &self.cache else {
            return jurisdiction.regional_holidays(year, &filter);
        };
        let key = (normalize(country), year, filter);
        if let Some(hit) = cache.read().expect("Registry cache poisoned").get(&key) {
            return HolidaySet::clone(hit);
        }
        let resolved = Arc::new(jurisdiction.regional_holidays(year, &key.2));
        self.remember(&jurisdiction, key, Arc::clone(&resolved));
        HolidaySet::clone(&resolved)
    }

    /// Store `resolved`, computed from the `source` snapshot, unless the
    /// country's rules changed in the meantime.
    ///
    /// The snapshot is compared while the cache write lock is held.
    /// `register_regional` swaps the jurisdiction before taking that lock to
    /// invalidate, so a result from a replaced snapshot is either refused
    /// here or purged by the invalidation that follows the swap.
    fn remember(&self, source: &Arc<Jurisdiction>, key: CacheKey, resolved: Arc<HolidaySet>) {
        let Some(cache) = &self.cache else {
            return;
        };
        let mut guard = cache.write().expect("Registry cache poisoned");
        let current = self.jurisdiction(&key.0);
        if !current.is_some_and(|j| Arc::ptr_eq(&j, source)) {
            debug!(country = %key.0, year = key.1, "rules changed during resolution, not cached");
            return;
        }
        guard.entry(key).or_insert(resolved);
    }

    fn invalidate(&self, country: &str) {
        if let Some(cache) = &self.cache {
            cache
                .write()
                .expect("Registry cache poisoned")
                .retain(|(c, _, _), _| c != country);
        }
    }
}

fn normalize(country: &str) -> CountryCode {
    country.trim().to_ascii_uppercase()
}
