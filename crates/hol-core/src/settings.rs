//! Global library settings.
//!
//! [`Settings`] is a process-wide singleton accessed via a
//! `std::sync::OnceLock`. It carries the defaults that registries and rule-set
//! builders read when they are created:
//!
//! * `cache_enabled`: whether a registry memoises resolved holiday sets per
//!   `(country, year, subdivisions)` key.
//! * `strict_collisions`: whether new rule sets default to rejecting
//!   same-date collisions instead of last-write-wins.
//!
//! Thread safety: values live behind a `Mutex` so they can be changed from any
//! thread. Tests that change a setting should restore it when done.

use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy)]
struct Values {
    cache_enabled: bool,
    strict_collisions: bool,
}

/// Process-wide settings used by the holidays-rs library.
pub struct Settings {
    values: Mutex<Values>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            values: Mutex::new(Values {
                cache_enabled: true,
                strict_collisions: false,
            }),
        })
    }

    /// Whether registries created from now on memoise resolved sets.
    pub fn cache_enabled(&self) -> bool {
        self.values.lock().expect("Settings mutex poisoned").cache_enabled
    }

    /// Enable or disable memoisation for registries created from now on.
    pub fn set_cache_enabled(&self, enabled: bool) {
        self.values
            .lock()
            .expect("Settings mutex poisoned")
            .cache_enabled = enabled;
    }

    /// Whether new rule sets default to the strict collision policy.
    pub fn strict_collisions(&self) -> bool {
        self.values
            .lock()
            .expect("Settings mutex poisoned")
            .strict_collisions
    }

    /// Set the default collision policy for new rule sets.
    pub fn set_strict_collisions(&self, strict: bool) {
        self.values
            .lock()
            .expect("Settings mutex poisoned")
            .strict_collisions = strict;
    }

    /// Restore every setting to its default.
    pub fn reset(&self) {
        *self.values.lock().expect("Settings mutex poisoned") = Values {
            cache_enabled: true,
            strict_collisions: false,
        };
    }
}
