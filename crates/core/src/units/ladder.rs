//! Multi-level packing units.
//!
//! A product is sold in a ladder of units, largest first: level 1 is the
//! outer pack (Box), higher levels are smaller (Strip, then Tablet). The
//! conversion factor of level N says how many level-N units make one unit
//! of level N-1. The top level's factor is ignored.

use std::collections::HashSet;

use medistock_shared::types::UnitId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::error::UnitError;

/// Decimal places for converted unit prices.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// One rung of a unit ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitLevel {
    /// Unit key.
    pub unit_id: UnitId,
    /// Display name, e.g. `Strip`.
    #[serde(alias = "unit", alias = "unit_name")]
    pub name: String,
    /// Short code, e.g. `STR`.
    #[serde(default)]
    pub code: Option<String>,
    /// Position in the ladder; 1 is the largest pack.
    pub level: u32,
    /// Units of this level per unit of the level above.
    pub conversion_factor: Decimal,
}

impl UnitLevel {
    /// Creates a level without a code.
    #[must_use]
    pub fn new(
        unit_id: UnitId,
        name: impl Into<String>,
        level: u32,
        conversion_factor: Decimal,
    ) -> Self {
        Self {
            unit_id,
            name: name.into(),
            code: None,
            level,
            conversion_factor,
        }
    }
}

/// Validated unit ladder, ordered from largest to smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitLadder {
    levels: Vec<UnitLevel>,
}

impl UnitLadder {
    /// Sorts and validates the levels.
    ///
    /// # Errors
    ///
    /// Returns an error if the ladder is empty, repeats a level or a unit, or
    /// has a non-positive factor below the top level.
    pub fn new(mut levels: Vec<UnitLevel>) -> Result<Self, UnitError> {
        if levels.is_empty() {
            return Err(UnitError::EmptyLadder);
        }

        levels.sort_by_key(|level| level.level);

        let mut units = HashSet::new();
        for (index, level) in levels.iter().enumerate() {
            if index > 0 && levels[index - 1].level == level.level {
                return Err(UnitError::DuplicateLevel { level: level.level });
            }
            if !units.insert(level.unit_id) {
                return Err(UnitError::DuplicateUnit {
                    unit_id: level.unit_id,
                });
            }
            if index > 0 && level.conversion_factor <= Decimal::ZERO {
                return Err(UnitError::InvalidFactor {
                    level: level.level,
                    factor: level.conversion_factor,
                });
            }
        }

        Ok(Self { levels })
    }

    /// Levels from largest to smallest.
    #[must_use]
    pub fn levels(&self) -> &[UnitLevel] {
        &self.levels
    }

    /// The largest pack.
    #[must_use]
    pub fn top(&self) -> &UnitLevel {
        &self.levels[0]
    }

    /// The smallest unit, in which stock quantities are counted.
    #[must_use]
    pub fn base(&self) -> &UnitLevel {
        &self.levels[self.levels.len() - 1]
    }

    /// Looks up a unit.
    ///
    /// # Errors
    ///
    /// Returns `UnitError::UnknownUnit` if the unit is not on this ladder.
    pub fn find(&self, unit_id: UnitId) -> Result<&UnitLevel, UnitError> {
        self.levels
            .iter()
            .find(|level| level.unit_id == unit_id)
            .ok_or(UnitError::UnknownUnit { unit_id })
    }

    /// How many of the smaller unit make one of the larger unit.
    ///
    /// The product of the factors of every level below the larger unit, down
    /// to and including the smaller one. Order of the arguments does not
    /// matter; equal units give 1.
    ///
    /// # Errors
    ///
    /// Returns an error if either unit is unknown or the product overflows.
    pub fn factor_between(&self, from: UnitId, to: UnitId) -> Result<Decimal, UnitError> {
        let from_level = self.find(from)?.level;
        let to_level = self.find(to)?.level;
        let (upper, lower) = (from_level.min(to_level), from_level.max(to_level));

        self.levels
            .iter()
            .filter(|level| level.level > upper && level.level <= lower)
            .try_fold(Decimal::ONE, |factor, level| {
                factor
                    .checked_mul(level.conversion_factor)
                    .ok_or(UnitError::Overflow)
            })
    }

    /// Re-expresses a unit price in another unit of the same product.
    ///
    /// Moving to a smaller unit divides by the factor, moving to a larger unit
    /// multiplies. Converted prices are rounded to two places, midpoints away
    /// from zero; a price in its own unit is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if either unit is unknown or the result overflows.
    pub fn convert_price(
        &self,
        price: Decimal,
        from: UnitId,
        to: UnitId,
    ) -> Result<Decimal, UnitError> {
        if from == to {
            self.find(from)?;
            return Ok(price);
        }

        let factor = self.factor_between(from, to)?;
        let converted = if self.find(from)?.level < self.find(to)?.level {
            price.checked_div(factor)
        } else {
            price.checked_mul(factor)
        }
        .ok_or(UnitError::Overflow)?;

        Ok(converted.round_dp_with_strategy(
            PRICE_DECIMAL_PLACES,
            RoundingStrategy::MidpointAwayFromZero,
        ))
    }

    /// Quantity expressed in the base (smallest) unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit is unknown or the result overflows.
    pub fn to_base_quantity(&self, quantity: Decimal, unit: UnitId) -> Result<Decimal, UnitError> {
        let factor = self.factor_between(unit, self.base().unit_id)?;
        quantity.checked_mul(factor).ok_or(UnitError::Overflow)
    }

    /// Human-readable chain, e.g. `1 Box = 10 Strip, 1 Strip = 10 Tablet`.
    ///
    /// A single-level ladder has no chain and renders as `-`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.levels.len() < 2 {
            return "-".to_string();
        }

        self.levels
            .windows(2)
            .map(|pair| {
                format!(
                    "1 {} = {} {}",
                    pair[0].name,
                    pair[1].conversion_factor.normalize(),
                    pair[1].name
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
