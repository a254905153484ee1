//! Expiry date rules.
//!
//! A batch either carries an explicit expiry date or a manufacture date plus
//! a shelf life. Month and year arithmetic clamps to the end of the month:
//! 31 January plus one month is the last day of February.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Unit of a shelf-life duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfLifeUnit {
    /// Calendar days.
    #[serde(alias = "day")]
    Days,
    /// Calendar months.
    #[serde(alias = "month")]
    Months,
    /// Calendar years.
    #[serde(alias = "year")]
    Years,
}

/// How the expiry of a batch is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryRule {
    /// Explicit expiry date.
    Date(NaiveDate),
    /// Manufacture date plus shelf life.
    ShelfLife {
        /// Manufacture date.
        manufactured: NaiveDate,
        /// Shelf-life length.
        value: u32,
        /// Shelf-life unit.
        unit: ShelfLifeUnit,
    },
}

/// Resolves the expiry date of a rule.
///
/// Returns `None` when the date falls outside the supported calendar range.
#[must_use]
pub fn resolve_expiry(rule: &ExpiryRule) -> Option<NaiveDate> {
    match *rule {
        ExpiryRule::Date(date) => Some(date),
        ExpiryRule::ShelfLife {
            manufactured,
            value,
            unit,
        } => match unit {
            ShelfLifeUnit::Days => manufactured.checked_add_days(Days::new(u64::from(value))),
            ShelfLifeUnit::Months => manufactured.checked_add_months(Months::new(value)),
            ShelfLifeUnit::Years => value
                .checked_mul(12)
                .and_then(|months| manufactured.checked_add_months(Months::new(months))),
        },
    }
}

/// Expiry entry mode on a purchase line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryMode {
    /// Exact expiry date.
    Date,
    /// Manufactured date plus shelf life.
    ShelfLife,
}

/// Expiry fields of a purchase line as the backend stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryInput {
    /// Which fields are authoritative.
    pub expiry_mode: ExpiryMode,
    /// Manufacture date.
    #[serde(default)]
    pub manufactured_date: Option<NaiveDate>,
    /// Explicit expiry date.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    /// Shelf-life length.
    #[serde(default)]
    pub shelf_life_value: Option<u32>,
    /// Shelf-life unit.
    #[serde(default)]
    pub shelf_life_unit: Option<ShelfLifeUnit>,
}

impl ExpiryInput {
    /// The rule these fields describe, if they are complete.
    ///
    /// A zero shelf life counts as unset.
    #[must_use]
    pub fn rule(&self) -> Option<ExpiryRule> {
        match self.expiry_mode {
            ExpiryMode::Date => self.expiry_date.map(ExpiryRule::Date),
            ExpiryMode::ShelfLife => {
                let manufactured = self.manufactured_date?;
                let value = self.shelf_life_value.filter(|value| *value > 0)?;
                let unit = self.shelf_life_unit?;
                Some(ExpiryRule::ShelfLife {
                    manufactured,
                    value,
                    unit,
                })
            }
        }
    }

    /// Resolved expiry date, or `None` when the fields are incomplete.
    #[must_use]
    pub fn resolve(&self) -> Option<NaiveDate> {
        self.rule().as_ref().and_then(resolve_expiry)
    }
}
