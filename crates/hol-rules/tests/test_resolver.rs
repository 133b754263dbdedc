//! Integration tests for rule resolution, regional composition, and the
//! registry query surface.
//!
//! The rule sets below are small excerpts of real jurisdictions, enough to
//! exercise every rule variant.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

use hol_core::Error;
use hol_rules::{
    compose_regional, resolve, resolve_strict, CollisionPolicy, JurisdictionRuleSet, Registry,
    Rule,
};
use hol_time::{Calendar, Date, Month, ObservancePolicy, Weekday};
use proptest::prelude::*;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn nationwide() -> BTreeSet<String> {
    BTreeSet::new()
}

fn codes(c: &[&str]) -> BTreeSet<String> {
    c.iter().map(|s| s.to_string()).collect()
}

/// Route resolver logs to the test harness; `RUST_LOG=hol_rules=debug` shows
/// collision reports.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn germany() -> JurisdictionRuleSet {
    JurisdictionRuleSet::builder("DE")
        .categories(["public", "catholic"])
        .subdivisions(["BB", "BW", "BY", "HE", "NW", "SN", "ST"])
        .rule(Rule::fixed("Neujahr", 1, 1).with_name("en", "New Year's Day"))
        .rule(Rule::easter("Karfreitag", -2).with_name("en", "Good Friday"))
        .rule(Rule::easter("Ostermontag", 1).with_name("en", "Easter Monday"))
        .rule(Rule::fixed("Tag der Arbeit", Month::May.into(), 1))
        .rule(Rule::easter("Christi Himmelfahrt", 39).with_id("ascension"))
        .rule(Rule::easter("Pfingstmontag", 50))
        .rule(Rule::fixed("Tag der Deutschen Einheit", 10, 3).valid_from(1990))
        .rule(Rule::fixed("Erster Weihnachtstag", 12, 25))
        .rule(Rule::fixed("Zweiter Weihnachtstag", 12, 26))
        .build()
        .unwrap()
}

fn german_states() -> JurisdictionRuleSet {
    JurisdictionRuleSet::builder("DE")
        .categories(["public", "catholic"])
        .rule(Rule::fixed("Heilige Drei Könige", 1, 6).in_subdivisions(["BW", "BY", "ST"]))
        .rule(
            Rule::easter("Fronleichnam", 60)
                .with_id("corpus_christi")
                .with_category("catholic")
                .in_subdivisions(["BW", "BY", "HE", "NW"]),
        )
        .rule(Rule::fixed("Reformationstag", 10, 31).in_subdivisions(["BB", "SN", "ST"]))
        .rule(
            // Wednesday before November 23
            Rule::relative_to("Buß- und Bettag", "totensonntag", -4).in_subdivisions(["SN"]),
        )
        .rule(
            // Sunday between November 20 and 26
            Rule::lookup("Totensonntag", [date(2024, 11, 24), date(2025, 11, 23)])
                .with_id("totensonntag")
                .in_subdivisions(["SN"]),
        )
        .build()
        .unwrap()
}

fn united_states() -> JurisdictionRuleSet {
    JurisdictionRuleSet::builder("US")
        .observance(ObservancePolicy::NearestWeekday)
        .rule(Rule::fixed("New Year's Day", 1, 1))
        .rule(
            Rule::nth_weekday("Martin Luther King Jr. Day", 1, Weekday::Monday, 3)
                .valid_from(1986),
        )
        .rule(Rule::last_weekday("Memorial Day", 5, Weekday::Monday))
        .rule(Rule::fixed("Juneteenth", 6, 19).valid_from(2021))
        .rule(Rule::fixed("Independence Day", 7, 4))
        .rule(Rule::nth_weekday("Labor Day", 9, Weekday::Monday, 1))
        .rule(Rule::nth_weekday("Thanksgiving Day", 11, Weekday::Thursday, 4))
        .rule(Rule::fixed("Christmas Day", 12, 25))
        .build()
        .unwrap()
}

// ─── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn good_friday_2024() {
    let rs = JurisdictionRuleSet::builder("XX")
        .rule(Rule::easter("Good Friday", -2))
        .build()
        .unwrap();
    let h = resolve(&rs, 2024, &nationwide());
    assert_eq!(h.dates(), vec![date(2024, 3, 29)]);
}

#[test]
fn weekend_holiday_observed_on_monday() {
    // June 20, 2026 is a Saturday
    let rs = JurisdictionRuleSet::builder("XX")
        .observance(ObservancePolicy::FollowingMonday)
        .rule(Rule::fixed("Flag Day", 6, 20))
        .build()
        .unwrap();
    let h = resolve(&rs, 2026, &nationwide());
    let record = h.get(date(2026, 6, 20)).unwrap();
    assert_eq!(record.date, date(2026, 6, 20));
    assert_eq!(record.observed_date, Some(date(2026, 6, 22)));
    assert_eq!(h.len(), 1);
}

#[test]
fn fourth_monday_in_october() {
    let rs = JurisdictionRuleSet::builder("NZ")
        .rule(Rule::nth_weekday("Labour Day", Month::October.into(), Weekday::Monday, 4))
        .build()
        .unwrap();
    assert_eq!(resolve(&rs, 2024, &nationwide()).dates(), vec![date(2024, 10, 28)]);
}

#[test]
fn later_rule_wins_collision() {
    init_tracing();
    let rs = JurisdictionRuleSet::builder("XX")
        .rule(Rule::fixed("Christmas Day", 12, 25).with_category("public"))
        .rule(
            Rule::fixed("Nativity of the Lord", 12, 25)
                .with_category("religious")
                .with_name("la", "Nativitas Domini"),
        )
        .build()
        .unwrap();
    let h = resolve(&rs, 2024, &nationwide());
    assert_eq!(h.len(), 1);
    let record = h.get(date(2024, 12, 25)).unwrap();
    assert_eq!(record.name, "Nativity of the Lord");
    assert_eq!(record.category, "religious");
    assert_eq!(record.name_in("la"), "Nativitas Domini");

    assert!(matches!(
        resolve_strict(&rs, 2024, &nationwide()),
        Err(Error::Collision { .. })
    ));
}

#[test]
fn validity_window_boundary() {
    let rs = JurisdictionRuleSet::builder("XX")
        .rule(Rule::fixed("Unity Day", 10, 3).valid_from(1990))
        .rule(Rule::fixed("Old Holiday", 6, 17).valid_from(1954).valid_until(1990))
        .build()
        .unwrap();
    let before = resolve(&rs, 1989, &nationwide());
    assert!(!before.contains(date(1989, 10, 3)));
    assert_eq!(before.len(), 1);
    let first = resolve(&rs, 1990, &nationwide());
    assert!(first.contains(date(1990, 10, 3)));
    assert!(first.contains(date(1990, 6, 17)));
    assert_eq!(resolve(&rs, 1991, &nationwide()).dates(), vec![date(1991, 10, 3)]);
}

// ─── Jurisdiction excerpts ────────────────────────────────────────────────────

#[test]
fn germany_2024() {
    let h = resolve(&germany(), 2024, &nationwide());
    assert_eq!(
        h.dates(),
        vec![
            date(2024, 1, 1),
            date(2024, 3, 29),
            date(2024, 4, 1),
            date(2024, 5, 1),
            date(2024, 5, 9),
            date(2024, 5, 20),
            date(2024, 10, 3),
            date(2024, 12, 25),
            date(2024, 12, 26),
        ]
    );
    assert_eq!(h.get(date(2024, 3, 29)).unwrap().name_in("en"), "Good Friday");
    assert!(h.observed_dates().is_empty());
}

#[test]
fn saxony_repentance_day_hangs_off_lookup() {
    let base = resolve(&germany(), 2024, &nationwide());
    let sn = compose_regional(&base, &german_states(), 2024, &codes(&["SN"]));
    assert!(sn.contains(date(2024, 11, 20)));
    assert!(sn.contains(date(2024, 11, 24)));
    assert!(sn.contains(date(2024, 10, 31)));
    assert!(!sn.contains(date(2024, 5, 30)));
    assert_eq!(sn.len(), base.len() + 3);

    // no table entry for 2026: neither the Sunday nor its dependant
    let base = resolve(&germany(), 2026, &nationwide());
    let sn = compose_regional(&base, &german_states(), 2026, &codes(&["SN"]));
    assert_eq!(sn.len(), base.len() + 1);
}

#[test]
fn bavaria_and_hesse() {
    let base = resolve(&germany(), 2025, &nationwide());
    let both = compose_regional(&base, &german_states(), 2025, &codes(&["BY", "HE"]));
    assert!(both.contains(date(2025, 1, 6)));
    let corpus = both.get(date(2025, 6, 19)).unwrap();
    assert_eq!(corpus.category, "catholic");
    assert!(!corpus.is_nationwide());
    assert_eq!(both.filter_category("catholic").len(), 1);
}

#[test]
fn united_states_2027_observed_dates() {
    let h = resolve(&united_states(), 2027, &nationwide());
    // Jan 1 Friday, Jun 19 Saturday, Jul 4 Sunday, Dec 25 Saturday
    assert_eq!(h.get(date(2027, 1, 1)).unwrap().observed_date, None);
    assert_eq!(h.get(date(2027, 6, 19)).unwrap().observed_date, Some(date(2027, 6, 18)));
    assert_eq!(h.get(date(2027, 7, 4)).unwrap().observed_date, Some(date(2027, 7, 5)));
    assert_eq!(h.get(date(2027, 12, 25)).unwrap().observed_date, Some(date(2027, 12, 24)));
    assert!(h.contains(date(2027, 5, 31)));
    assert!(h.contains(date(2027, 1, 18)));
    assert_eq!(h.len(), 8);
    assert_eq!(resolve(&united_states(), 1985, &nationwide()).len(), 6);
}

// ─── Properties ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn resolution_is_idempotent(year in 1900u16..=2100, by in any::<bool>()) {
        let rs = german_states();
        let filter = if by { codes(&["BY"]) } else { nationwide() };
        prop_assert_eq!(resolve(&rs, year, &filter), resolve(&rs, year, &filter));
    }

    #[test]
    fn empty_regional_set_leaves_base_unchanged(year in 1900u16..=2100) {
        let base = resolve(&germany(), year, &nationwide());
        let empty = JurisdictionRuleSet::builder("DE").build().unwrap();
        prop_assert_eq!(compose_regional(&base, &empty, year, &codes(&["BY"])), base);
    }

    #[test]
    fn easter_rules_stay_in_spring(year in 1900u16..=2100) {
        let h = resolve(&germany(), year, &nationwide());
        let good_friday = h
            .iter()
            .find(|(_, r)| r.name == "Karfreitag")
            .map(|(d, _)| *d)
            .unwrap();
        prop_assert_eq!(good_friday.weekday(), Weekday::Friday);
        prop_assert!(good_friday >= date(year, 3, 20) && good_friday <= date(year, 4, 23));
    }
}

// ─── Registry ─────────────────────────────────────────────────────────────────

#[test]
fn registry_query_surface() {
    init_tracing();
    let reg = Registry::new();
    reg.register(germany()).unwrap();
    reg.register_regional(german_states()).unwrap();
    reg.register(united_states()).unwrap();

    assert_eq!(reg.countries(), vec!["DE".to_string(), "US".to_string()]);
    assert_eq!(reg.get_holidays("DE", 2024).len(), 9);
    assert_eq!(reg.get_regional_holidays("DE", 2024, ["BY"]).len(), 11);
    assert!(reg.get_regional_holidays("DE", 2024, ["Atlantis"]).is_empty());
    assert!(reg.is_subdivision_supported("DE", "SN"));
    assert!(!reg.is_subdivision_supported("US", "SN"));
    assert!(reg.is_category_supported("DE", "catholic"));
    assert!(!reg.is_category_supported("XX", "public"));

    let cal = reg.calendar("US", Vec::<String>::new()).unwrap();
    // 2027-07-05 is the observed Independence Day
    assert!(!cal.is_business_day(date(2027, 7, 5)));
    assert!(reg.calendar("XX", Vec::<String>::new()).is_none());
}

#[test]
fn construction_errors_prevent_registration() {
    let reg = Registry::new();
    let bad = JurisdictionRuleSet::builder("XX")
        .rule(Rule::relative_to("Day after", "missing", 1))
        .build();
    assert!(matches!(bad, Err(Error::InvalidRule(_))));
    assert!(reg.countries().is_empty());
}

#[test]
fn concurrent_resolution() {
    let rs = Arc::new(united_states());
    let expected = resolve(&rs, 2030, &nationwide());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rs = Arc::clone(&rs);
            thread::spawn(move || resolve(&rs, 2030, &BTreeSet::new()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn concurrent_registry_queries() {
    let reg = Arc::new(Registry::new());
    reg.register(germany()).unwrap();
    reg.register_regional(german_states()).unwrap();
    let handles: Vec<_> = (2020..2030u16)
        .map(|year| {
            let reg = Arc::clone(&reg);
            thread::spawn(move || (year, reg.get_regional_holidays("DE", year, ["SN"])))
        })
        .collect();
    for handle in handles {
        let (year, h) = handle.join().unwrap();
        assert_eq!(h, reg.get_regional_holidays("DE", year, ["SN"]));
        assert!(h.contains(date(year, 10, 31)));
    }
}

#[test]
fn strict_policy_from_builder() {
    let rs = JurisdictionRuleSet::builder("XX")
        .collision_policy(CollisionPolicy::Strict)
        .rule(Rule::fixed("A", 1, 1))
        .rule(Rule::fixed("B", 1, 2))
        .build()
        .unwrap();
    assert_eq!(resolve_strict(&rs, 2024, &nationwide()).unwrap().len(), 2);
}
