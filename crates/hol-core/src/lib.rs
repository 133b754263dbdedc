//! # hol-core
//!
//! Core types, error definitions, and settings for holidays-rs.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: code and year aliases, the error enum with
//! its early-return macros, and the process-wide `Settings`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `invalid_rule!` / `fail!` macros.
pub mod errors;

/// Global library settings (cache, collision policy defaults).
pub mod settings;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Gregorian calendar year.
pub type Year = u16;

/// ISO 3166-1 country code (e.g. `"US"`).
pub type CountryCode = String;

/// Sub-national administrative unit code (e.g. `"BY"` for Bavaria).
pub type SubdivisionCode = String;

/// Language code used as a key for translated names (e.g. `"de"`).
pub type LanguageCode = String;

/// Identifier of a rule within a rule set.
pub type RuleId = String;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use settings::Settings;
