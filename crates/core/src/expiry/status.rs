//! Expiry classification.

use chrono::NaiveDate;
use medistock_shared::config::ExpiryConfig;
use serde::Serialize;

/// Shelf state of a batch on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// Past its expiry date.
    Expired,
    /// Expires within the warning window. A batch expiring today is still
    /// sellable today and falls here.
    ExpiringSoon,
    /// Expires after the warning window.
    Fresh,
}

/// Whole days from `today` to `expiry`; negative once expired.
#[must_use]
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Classifies expiry dates against a warning window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    warning_days: i64,
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self::new(&ExpiryConfig::default())
    }
}

impl ExpiryPolicy {
    /// Creates a policy from configuration. Negative windows count as zero.
    #[must_use]
    pub fn new(config: &ExpiryConfig) -> Self {
        Self {
            warning_days: config.warning_days.max(0),
        }
    }

    /// Warning window in days.
    #[must_use]
    pub const fn warning_days(&self) -> i64 {
        self.warning_days
    }

    /// Status of a batch expiring on `expiry`, as of `today`.
    #[must_use]
    pub fn status(&self, expiry: NaiveDate, today: NaiveDate) -> ExpiryStatus {
        match days_until_expiry(expiry, today) {
            days if days < 0 => ExpiryStatus::Expired,
            days if days <= self.warning_days => ExpiryStatus::ExpiringSoon,
            _ => ExpiryStatus::Fresh,
        }
    }
}
