//! # holidays
//!
//! Declarative public-holiday resolution. Jurisdictions describe their
//! holidays as rules (fixed dates, Easter offsets, nth weekdays, lookup
//! tables, offsets from other rules); the engine turns them into concrete,
//! observance-adjusted dates for any year and subdivision.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `hol-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! holidays = "0.1"
//! ```
//!
//! ```rust
//! use holidays::rules::{JurisdictionRuleSet, Registry, Rule};
//! use holidays::time::{Calendar, Date, ObservancePolicy, Weekday};
//!
//! let uk = JurisdictionRuleSet::builder("GB")
//!     .observance(ObservancePolicy::FollowingMonday)
//!     .rule(Rule::easter("Good Friday", -2))
//!     .rule(Rule::nth_weekday("Early May Bank Holiday", 5, Weekday::Monday, 1))
//!     .rule(Rule::fixed("St Andrew's Day", 11, 30).in_subdivisions(["SCT"]))
//!     .build()?;
//!
//! let registry = Registry::new();
//! registry.register(uk)?;
//! assert!(registry.is_subdivision_supported("GB", "SCT"));
//!
//! let scotland = registry.get_regional_holidays("GB", 2025, ["SCT"]);
//! assert_eq!(scotland.len(), 3);
//!
//! // 2025-11-30 is a Sunday, so the observed day closes Monday
//! let cal = registry.calendar("GB", ["SCT"]).unwrap();
//! assert!(!cal.is_business_day(Date::from_ymd(2025, 12, 1)?));
//! # Ok::<(), holidays::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error type, shared aliases, and process-wide settings.
pub use hol_core as core;

/// Dates, weekdays, Easter, observance shifts, and business-day calendars.
pub use hol_time as time;

/// Rule model, resolver, regional composer, and jurisdiction registry.
pub use hol_rules as rules;
