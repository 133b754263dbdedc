//! Declarative holiday rules.
//!
//! A [`Rule`] pairs shared metadata (name, category, translations, validity
//! window, subdivision restriction, optional observance override) with a
//! [`RuleKind`] describing how the date is generated for a given year.
//! Rules carry no behaviour beyond structural validation; the resolver turns
//! them into dates.

use std::collections::{BTreeMap, BTreeSet};

use hol_core::errors::Result;
use hol_core::{invalid_rule, LanguageCode, RuleId, SubdivisionCode, Year};
use hol_time::{days_in_month, Date, ObservancePolicy, Weekday};

/// Category assigned to rules that do not declare one.
pub const DEFAULT_CATEGORY: &str = "public";

/// How a rule generates its date for a year.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// The same month and day every year.
    FixedDate {
        /// Month (1–12).
        month: u8,
        /// Day of month.
        day: u8,
    },
    /// A signed number of days from Western Easter Sunday.
    EasterOffset {
        /// Days after Easter Sunday; negative is before.
        offset_days: i32,
    },
    /// The `n`-th `weekday` of `month`; `n == -1` is the last one.
    NthWeekdayOfMonth {
        /// Month (1–12).
        month: u8,
        /// Weekday to count.
        weekday: Weekday,
        /// Occurrence, `1..=5` or `-1`.
        n: i8,
    },
    /// Externally supplied dates for astronomically or lunar-determined
    /// holidays. Years absent from the table yield no occurrence.
    LookupTable {
        /// Date of the holiday per year.
        dates: BTreeMap<Year, Date>,
    },
    /// A fixed offset from another rule's resolved date.
    Composite {
        /// Id of the anchor rule in the same rule set.
        offset_from_rule: RuleId,
        /// Days after the anchor; negative is before.
        offset_days: i32,
    },
}

/// A holiday-generation rule plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    id: RuleId,
    name: String,
    category: String,
    languages: BTreeMap<LanguageCode, String>,
    valid_from: Option<Year>,
    valid_until: Option<Year>,
    subdivisions: BTreeSet<SubdivisionCode>,
    observance: Option<ObservancePolicy>,
    kind: RuleKind,
}

impl Rule {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create a rule of the given kind. The id defaults to the name.
    pub fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            category: DEFAULT_CATEGORY.to_string(),
            languages: BTreeMap::new(),
            valid_from: None,
            valid_until: None,
            subdivisions: BTreeSet::new(),
            observance: None,
            kind,
        }
    }

    /// Holiday on the same month/day every year.
    pub fn fixed(name: impl Into<String>, month: u8, day: u8) -> Self {
        Self::new(name, RuleKind::FixedDate { month, day })
    }

    /// Holiday `offset_days` from Easter Sunday (e.g. `-2` for Good Friday).
    pub fn easter(name: impl Into<String>, offset_days: i32) -> Self {
        Self::new(name, RuleKind::EasterOffset { offset_days })
    }

    /// Holiday on the `n`-th `weekday` of `month` (`n == -1` for the last).
    pub fn nth_weekday(name: impl Into<String>, month: u8, weekday: Weekday, n: i8) -> Self {
        Self::new(name, RuleKind::NthWeekdayOfMonth { month, weekday, n })
    }

    /// Holiday on the last `weekday` of `month`.
    pub fn last_weekday(name: impl Into<String>, month: u8, weekday: Weekday) -> Self {
        Self::nth_weekday(name, month, weekday, -1)
    }

    /// Holiday taken from a per-year table; each date is keyed by its year.
    pub fn lookup(name: impl Into<String>, dates: impl IntoIterator<Item = Date>) -> Self {
        Self::new(
            name,
            RuleKind::LookupTable {
                dates: dates.into_iter().map(|d| (d.year(), d)).collect(),
            },
        )
    }

    /// Holiday `offset_days` after the date resolved for rule `anchor`.
    pub fn relative_to(
        name: impl Into<String>,
        anchor: impl Into<RuleId>,
        offset_days: i32,
    ) -> Self {
        Self::new(
            name,
            RuleKind::Composite {
                offset_from_rule: anchor.into(),
                offset_days,
            },
        )
    }

    // ── Metadata setters ─────────────────────────────────────────────────

    /// Override the rule id (used by `Composite` references).
    pub fn with_id(mut self, id: impl Into<RuleId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Add a translated name.
    pub fn with_name(mut self, language: impl Into<LanguageCode>, name: impl Into<String>) -> Self {
        self.languages.insert(language.into(), name.into());
        self
    }

    /// First year the rule applies (inclusive).
    pub fn valid_from(mut self, year: Year) -> Self {
        self.valid_from = Some(year);
        self
    }

    /// Last year the rule applies (inclusive).
    pub fn valid_until(mut self, year: Year) -> Self {
        self.valid_until = Some(year);
        self
    }

    /// Restrict the rule to the given subdivisions.
    pub fn in_subdivisions<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SubdivisionCode>,
    {
        self.subdivisions.extend(codes.into_iter().map(Into::into));
        self
    }

    /// Override the jurisdiction's weekend-observance policy for this rule.
    pub fn observed(mut self, policy: ObservancePolicy) -> Self {
        self.observance = Some(policy);
        self
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Rule id, unique within a rule set.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Translated names.
    pub fn languages(&self) -> &BTreeMap<LanguageCode, String> {
        &self.languages
    }

    /// Subdivision restriction; empty means nationwide.
    pub fn subdivisions(&self) -> &BTreeSet<SubdivisionCode> {
        &self.subdivisions
    }

    /// Per-rule observance override.
    pub fn observance(&self) -> Option<ObservancePolicy> {
        self.observance
    }

    /// Generation rule.
    pub fn kind(&self) -> &RuleKind {
        &self.kind
    }

    /// Whether `year` lies inside the validity window (open bounds if unset).
    pub fn is_active_in(&self, year: Year) -> bool {
        self.valid_from.map_or(true, |from| year >= from)
            && self.valid_until.map_or(true, |until| year <= until)
    }

    /// Whether the rule passes a caller's subdivision filter. Nationwide
    /// rules and empty filters always pass.
    pub fn applies_to(&self, filter: &BTreeSet<SubdivisionCode>) -> bool {
        self.subdivisions.is_empty()
            || filter.is_empty()
            || !self.subdivisions.is_disjoint(filter)
    }

    /// The anchor rule id if this is a `Composite` rule.
    pub fn dependency(&self) -> Option<&str> {
        match &self.kind {
            RuleKind::Composite {
                offset_from_rule, ..
            } => Some(offset_from_rule.as_str()),
            _ => None,
        }
    }

    /// Check the rule's own structure. Cross-rule checks (unique ids,
    /// composite references, declared vocabularies) belong to the rule set.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            invalid_rule!("rule {:?} has an empty id", self.name);
        }
        if let (Some(from), Some(until)) = (self.valid_from, self.valid_until) {
            if from > until {
                invalid_rule!("{}: valid_from {from} is after valid_until {until}", self.id);
            }
        }
        match &self.kind {
            RuleKind::FixedDate { month, day } => {
                // Validated against a leap year so February 29 is accepted;
                // it simply has no occurrence in common years.
                if !(1..=12).contains(month) || *day == 0 || *day > days_in_month(2000, *month) {
                    invalid_rule!("{}: {month:02}-{day:02} is not a calendar date", self.id);
                }
            }
            RuleKind::NthWeekdayOfMonth { month, n, .. } => {
                if !(1..=12).contains(month) {
                    invalid_rule!("{}: month {month} out of range [1, 12]", self.id);
                }
                if !((1..=5).contains(n) || *n == -1) {
                    invalid_rule!("{}: weekday ordinal {n} must be in 1..=5 or -1", self.id);
                }
            }
            RuleKind::LookupTable { dates } => {
                if let Some((year, date)) = dates.iter().find(|(y, d)| d.year() != **y) {
                    invalid_rule!("{}: table entry {year} maps to {date} in another year", self.id);
                }
            }
            RuleKind::EasterOffset { .. } | RuleKind::Composite { .. } => {}
        }
        Ok(())
    }
}
