//! # hol-rules
//!
//! The holiday rule engine: a declarative rule model, the resolver that
//! evaluates a jurisdiction's rules for a year, the composer that layers
//! regional rules over a nationwide result, and a registry exposing the
//! query surface used by scheduling and payroll callers.
//!
//! ```
//! use hol_rules::{JurisdictionRuleSet, Registry, Rule};
//! use hol_time::{Date, ObservancePolicy, Weekday};
//!
//! let us = JurisdictionRuleSet::builder("US")
//!     .observance(ObservancePolicy::NearestWeekday)
//!     .rule(Rule::fixed("Independence Day", 7, 4))
//!     .rule(Rule::nth_weekday("Thanksgiving Day", 11, Weekday::Thursday, 4))
//!     .build()?;
//!
//! let registry = Registry::new();
//! registry.register(us)?;
//!
//! let holidays = registry.get_holidays("US", 2026);
//! let july4 = holidays.get(Date::from_ymd(2026, 7, 4)?).unwrap();
//! // July 4, 2026 is a Saturday, observed on Friday
//! assert_eq!(july4.observed_date, Some(Date::from_ymd(2026, 7, 3)?));
//! # Ok::<(), hol_core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day calendar over resolved holidays.
pub mod calendar;

/// Regional composition.
pub mod composer;

/// Base rule set plus regional layers of one country.
pub mod jurisdiction;

/// `HolidayRecord` and `HolidaySet`.
pub mod record;

/// Jurisdiction registry and query surface.
pub mod registry;

/// Rule resolution.
pub mod resolver;

/// `Rule` and `RuleKind`.
pub mod rule;

/// `JurisdictionRuleSet` and its builder.
pub mod rule_set;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::JurisdictionCalendar;
pub use composer::{compose_all, compose_regional};
pub use jurisdiction::Jurisdiction;
pub use record::{HolidayRecord, HolidaySet};
pub use registry::Registry;
pub use resolver::{resolve, resolve_nationwide, resolve_range, resolve_strict};
pub use rule::{Rule, RuleKind, DEFAULT_CATEGORY};
pub use rule_set::{CollisionPolicy, JurisdictionRuleSet, RuleSetBuilder};
