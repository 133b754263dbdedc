//! Subdivision composer: layering regional rule sets over a base result.

use std::collections::BTreeSet;

use hol_core::{SubdivisionCode, Year};

use crate::record::HolidaySet;
use crate::resolver::{resolve_scoped, Scope};
use crate::rule_set::JurisdictionRuleSet;

/// Resolve `regional` for `year` and merge it over `base`.
///
/// The regional result wins on a shared date, as regional holidays are the
/// more specific. `base` is never modified.
///
/// With an empty `filter` only the regional rules that carry no subdivision
/// restriction contribute, so restricted holidays never leak nationwide.
pub fn compose_regional(
    base: &HolidaySet,
    regional: &JurisdictionRuleSet,
    year: Year,
    filter: &BTreeSet<SubdivisionCode>,
) -> HolidaySet {
    let scope = if filter.is_empty() {
        Scope::Nationwide
    } else {
        Scope::Matching(filter)
    };
    let layer = resolve_scoped(regional, year, scope);
    if layer.is_empty() {
        return base.clone();
    }
    base.merged_with(&layer)
}

/// Fold several regional layers over `base`, later layers winning.
pub fn compose_all<'a>(
    base: &HolidaySet,
    layers: impl IntoIterator<Item = &'a JurisdictionRuleSet>,
    year: Year,
    filter: &BTreeSet<SubdivisionCode>,
) -> HolidaySet {
    layers
        .into_iter()
        .fold(base.clone(), |acc, layer| compose_regional(&acc, layer, year, filter))
}
