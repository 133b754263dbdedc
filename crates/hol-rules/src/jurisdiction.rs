//! A jurisdiction: a nationwide base rule set plus its regional layers.

use std::collections::BTreeSet;
use std::sync::Arc;

use hol_core::{SubdivisionCode, Year};

use crate::composer::compose_all;
use crate::record::HolidaySet;
use crate::resolver::{resolve, resolve_nationwide};
use crate::rule_set::JurisdictionRuleSet;

/// The rule sets registered for one country.
#[derive(Debug, Clone)]
pub struct Jurisdiction {
    base: Arc<JurisdictionRuleSet>,
    regional: Vec<Arc<JurisdictionRuleSet>>,
}

impl Jurisdiction {
    /// A jurisdiction with no regional layers.
    pub fn new(base: JurisdictionRuleSet) -> Self {
        Self {
            base: Arc::new(base),
            regional: Vec::new(),
        }
    }

    /// Return a copy with `layer` appended to the regional layers.
    pub fn with_regional(&self, layer: JurisdictionRuleSet) -> Self {
        let mut next = self.clone();
        next.regional.push(Arc::new(layer));
        next
    }

    /// Country code of the base rule set.
    pub fn country_code(&self) -> &str {
        self.base.country_code()
    }

    /// The nationwide rule set.
    pub fn base(&self) -> &JurisdictionRuleSet {
        &self.base
    }

    /// Regional layers in registration order.
    pub fn regional(&self) -> impl Iterator<Item = &JurisdictionRuleSet> {
        self.regional.iter().map(AsRef::as_ref)
    }

    /// Nationwide holidays of `year`: rules without a subdivision
    /// restriction, from the base set and every regional layer.
    pub fn holidays(&self, year: Year) -> HolidaySet {
        let base = resolve_nationwide(&self.base, year);
        compose_all(&base, self.regional(), year, &BTreeSet::new())
    }

    /// Holidays of `year` applying in any of `subdivisions`, nationwide ones
    /// included. An empty filter yields [`Jurisdiction::holidays`].
    pub fn regional_holidays(
        &self,
        year: Year,
        subdivisions: &BTreeSet<SubdivisionCode>,
    ) -> HolidaySet {
        if subdivisions.is_empty() {
            return self.holidays(year);
        }
        let base = resolve(&self.base, year, subdivisions);
        compose_all(&base, self.regional(), year, subdivisions)
    }

    /// Whether `code` is declared by the base set or a regional layer.
    pub fn is_subdivision_supported(&self, code: &str) -> bool {
        self.base.is_subdivision_supported(code)
            || self.regional().any(|r| r.is_subdivision_supported(code))
    }

    /// Whether `category` is declared by the base set or a regional layer.
    pub fn is_category_supported(&self, category: &str) -> bool {
        self.base.is_category_supported(category)
            || self.regional().any(|r| r.is_category_supported(category))
    }

    /// Every declared subdivision code.
    pub fn subdivisions(&self) -> BTreeSet<SubdivisionCode> {
        let mut out = self.base.subdivisions().clone();
        for layer in self.regional() {
            out.extend(layer.subdivisions().iter().cloned());
        }
        out
    }
}
