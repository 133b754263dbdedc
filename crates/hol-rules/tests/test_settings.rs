//! Process-wide settings and the global registry.
//!
//! `Settings` is shared by every test in a binary, so everything that changes
//! it lives in this binary and runs from a single test, restoring the
//! defaults as it goes.

use std::sync::Arc;

use hol_core::Settings;
use hol_rules::{resolve, resolve_strict, CollisionPolicy, JurisdictionRuleSet, Registry, Rule};
use hol_time::Date;

fn date(y: u16, m: u8, d: u8) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn christmas_twice(country: &str) -> JurisdictionRuleSet {
    JurisdictionRuleSet::builder(country)
        .rule(Rule::fixed("Christmas Day", 12, 25))
        .rule(Rule::fixed("Feast of the Nativity", 12, 25))
        .build()
        .unwrap()
}

fn strict_collisions_become_the_builder_default() {
    let settings = Settings::instance();
    assert_eq!(christmas_twice("XX").collision_policy(), CollisionPolicy::LastWriteWins);

    settings.set_strict_collisions(true);
    let strict = christmas_twice("XX");
    assert_eq!(strict.collision_policy(), CollisionPolicy::Strict);
    // the infallible resolver still keeps the later rule
    let h = resolve(&strict, 2024, &Default::default());
    assert_eq!(h.get(date(2024, 12, 25)).unwrap().name, "Feast of the Nativity");
    assert!(resolve_strict(&strict, 2024, &Default::default()).is_err());

    // an explicit policy beats the default
    let lenient = JurisdictionRuleSet::builder("XX")
        .collision_policy(CollisionPolicy::LastWriteWins)
        .build()
        .unwrap();
    assert_eq!(lenient.collision_policy(), CollisionPolicy::LastWriteWins);

    settings.reset();
    assert_eq!(christmas_twice("XX").collision_policy(), CollisionPolicy::LastWriteWins);
}

fn registry_without_cache() {
    let settings = Settings::instance();
    settings.set_cache_enabled(false);
    let reg = Registry::new();
    settings.reset();
    assert!(!reg.cache_enabled());
    assert!(Registry::new().cache_enabled());

    reg.register(christmas_twice("XX")).unwrap();
    let first = reg.get_holidays("XX", 2024);
    assert_eq!(first.len(), 1);
    reg.register_regional(
        JurisdictionRuleSet::builder("XX")
            .rule(Rule::fixed("Boxing Day", 12, 26))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(reg.get_holidays("XX", 2024).len(), 2);
    reg.clear_cache();
    assert_eq!(
        reg.get_holidays("XX", 2024),
        reg.jurisdiction("XX").unwrap().holidays(2024)
    );
}

fn global_registry() {
    let global = Registry::global();
    assert!(std::ptr::eq(global, Registry::global()));
    global
        .register(
            JurisdictionRuleSet::builder("zz")
                .rule(Rule::fixed("Founding Day", 3, 1))
                .build()
                .unwrap(),
        )
        .unwrap();
    assert!(global.countries().contains(&"ZZ".to_string()));
    assert!(global.get_holidays("zz", 2025).contains(date(2025, 3, 1)));

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(|| Registry::global().get_holidays("ZZ", 2030).len()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
    let jurisdiction = global.jurisdiction("ZZ").unwrap();
    assert!(Arc::ptr_eq(&jurisdiction, &global.jurisdiction(" zz ").unwrap()));
}

#[test]
fn settings_and_global_registry() {
    strict_collisions_become_the_builder_default();
    registry_without_cache();
    global_registry();
    Settings::instance().reset();
}
