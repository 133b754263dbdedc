//! Rule resolution: turning a [`JurisdictionRuleSet`] into the concrete
//! [`HolidaySet`] of one year.
//!
//! Resolution is a pure function of `(rule set, year, subdivision filter)`.
//! Each call allocates its own result, so concurrent calls need no locking.
//!
//! # Collisions
//! Records are keyed by their true date. When two rules resolve to the same
//! date, the rule declared later wins (last-write-wins). This is deliberate:
//! jurisdictions should avoid colliding rules unless the overwrite is
//! intended. [`resolve_strict`] reports collisions as errors instead.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use hol_core::errors::{Error, Result};
use hol_core::{SubdivisionCode, Year};
use hol_time::date::{MAX_YEAR, MIN_YEAR};
use hol_time::{easter_offset, Date};
use tracing::{debug, trace, warn};

use crate::record::{HolidayRecord, HolidaySet};
use crate::rule::{Rule, RuleKind};
use crate::rule_set::{CollisionPolicy, JurisdictionRuleSet};

/// Which subdivision-restricted rules take part in a resolution.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'a> {
    /// Every rule, regardless of restriction.
    All,
    /// Only rules without a subdivision restriction.
    Nationwide,
    /// Nationwide rules plus rules restricted to any of these codes.
    Matching(&'a BTreeSet<SubdivisionCode>),
}

impl Scope<'_> {
    fn from_filter(filter: &BTreeSet<SubdivisionCode>) -> Scope<'_> {
        if filter.is_empty() {
            Scope::All
        } else {
            Scope::Matching(filter)
        }
    }

    fn admits(&self, rule: &Rule) -> bool {
        match self {
            Scope::All => true,
            Scope::Nationwide => rule.subdivisions().is_empty(),
            Scope::Matching(filter) => rule.applies_to(filter),
        }
    }
}

/// Resolve `rule_set` for `year`.
///
/// An empty `filter` admits every rule; a non-empty one admits nationwide
/// rules plus rules restricted to at least one of the listed subdivisions.
/// Rules outside their validity window, lookup-table misses, and dates that
/// do not exist this year (February 29, a fifth weekday) contribute nothing.
///
/// Only dates inside `year` are returned. Movable rules are also evaluated
/// against the neighbouring years' anchors, so an Easter offset or a
/// composite offset that crosses New Year lands in the year it falls in.
/// Validity windows apply to the anchor year.
///
/// ```
/// use std::collections::BTreeSet;
/// use hol_rules::{resolve, JurisdictionRuleSet, Rule};
/// use hol_time::Date;
///
/// let rs = JurisdictionRuleSet::builder("XX")
///     .rule(Rule::easter("Good Friday", -2))
///     .build()
///     .unwrap();
/// let holidays = resolve(&rs, 2024, &BTreeSet::new());
/// assert!(holidays.contains(Date::from_ymd(2024, 3, 29).unwrap()));
/// ```
pub fn resolve(
    rule_set: &JurisdictionRuleSet,
    year: Year,
    filter: &BTreeSet<SubdivisionCode>,
) -> HolidaySet {
    resolve_scoped(rule_set, year, Scope::from_filter(filter))
}

/// Resolve only the rules of `rule_set` that carry no subdivision
/// restriction.
pub fn resolve_nationwide(rule_set: &JurisdictionRuleSet, year: Year) -> HolidaySet {
    resolve_scoped(rule_set, year, Scope::Nationwide)
}

/// Like [`resolve`], but a same-date collision is an error.
///
/// # Errors
/// [`Error::Collision`] naming the contested date and both holidays.
pub fn resolve_strict(
    rule_set: &JurisdictionRuleSet,
    year: Year,
    filter: &BTreeSet<SubdivisionCode>,
) -> Result<HolidaySet> {
    let mut out = HolidaySet::new();
    for record in occurrences(rule_set, year, Scope::from_filter(filter)) {
        if let Some(existing) = out.get(record.date) {
            return Err(Error::Collision {
                date: record.date.to_string(),
                first: existing.name.clone(),
                second: record.name,
            });
        }
        out.insert(record);
    }
    Ok(out)
}

/// Resolve every year in `years` and merge the results.
pub fn resolve_range(
    rule_set: &JurisdictionRuleSet,
    years: RangeInclusive<Year>,
    filter: &BTreeSet<SubdivisionCode>,
) -> HolidaySet {
    let mut out = HolidaySet::new();
    for year in years {
        out.extend(resolve(rule_set, year, filter).into_iter().map(|(_, r)| r));
    }
    out
}

pub(crate) fn resolve_scoped(
    rule_set: &JurisdictionRuleSet,
    year: Year,
    scope: Scope<'_>,
) -> HolidaySet {
    let mut out = HolidaySet::new();
    for record in occurrences(rule_set, year, scope) {
        let (date, name) = (record.date, record.name.clone());
        if let Some(previous) = out.insert(record) {
            match rule_set.collision_policy() {
                CollisionPolicy::LastWriteWins => debug!(
                    country = rule_set.country_code(),
                    %date,
                    replaced = %previous.name,
                    by = %name,
                    "holiday collision, keeping later rule"
                ),
                CollisionPolicy::Strict => warn!(
                    country = rule_set.country_code(),
                    %date,
                    replaced = %previous.name,
                    by = %name,
                    "holiday collision in strict rule set, keeping later rule"
                ),
            }
        }
    }
    out
}

/// Records of every admitted rule with an occurrence in `year`, in
/// declaration order.
fn occurrences(
    rule_set: &JurisdictionRuleSet,
    year: Year,
    scope: Scope<'_>,
) -> Vec<HolidayRecord> {
    if !in_range(year) {
        return Vec::new();
    }
    // Anchor years whose dates may spill into `year`.
    let anchors: Vec<Vec<Option<Date>>> = [year.checked_sub(1), Some(year), year.checked_add(1)]
        .into_iter()
        .flatten()
        .filter(|y| in_range(*y))
        .map(|y| base_dates(rule_set, y))
        .collect();

    let mut out = Vec::new();
    for (i, rule) in rule_set.rules().iter().enumerate() {
        if !scope.admits(rule) {
            trace!(rule = rule.id(), "outside subdivision filter");
            continue;
        }
        let policy = rule.observance().unwrap_or(rule_set.observance());
        for date in anchors.iter().filter_map(|dates| dates[i]) {
            if date.year() != year {
                continue;
            }
            out.push(HolidayRecord {
                name: rule.name().to_string(),
                date,
                category: rule.category().to_string(),
                languages: rule.languages().clone(),
                observed_date: policy.shift(date),
                subdivisions: rule.subdivisions().clone(),
            });
        }
    }
    out
}

fn in_range(year: Year) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Base date of every rule (indexed like `rule_set.rules()`), computed in
/// dependency order so `Composite` anchors are known first.
///
/// Anchors are computed regardless of the subdivision filter: a regional
/// holiday may hang off a date that is itself restricted elsewhere.
fn base_dates(rule_set: &JurisdictionRuleSet, year: Year) -> Vec<Option<Date>> {
    let rules = rule_set.rules();
    let mut dates: Vec<Option<Date>> = vec![None; rules.len()];
    for &i in rule_set.evaluation_order() {
        let rule = &rules[i];
        if !rule.is_active_in(year) {
            trace!(rule = rule.id(), year, "outside validity window");
            continue;
        }
        dates[i] = match rule.kind() {
            RuleKind::FixedDate { month, day } => Date::from_ymd(year, *month, *day).ok(),
            RuleKind::EasterOffset { offset_days } => easter_offset(year, *offset_days),
            // The ordinal was validated when the rule set was built, so the
            // only failure left is a fifth weekday the month does not have.
            RuleKind::NthWeekdayOfMonth { month, weekday, n } => {
                Date::nth_weekday(year, *month, *weekday, *n).ok()
            }
            RuleKind::LookupTable { dates } => dates.get(&year).copied(),
            RuleKind::Composite {
                offset_from_rule,
                offset_days,
            } => rule_set
                .position(offset_from_rule)
                .and_then(|anchor| dates[anchor])
                .and_then(|d| d.add_days(*offset_days).ok()),
        };
    }
    dates
}
