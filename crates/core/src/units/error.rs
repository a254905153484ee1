//! Unit ladder error types.

use medistock_shared::AppError;
use medistock_shared::types::UnitId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while building or querying a unit ladder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A product must have at least one unit.
    #[error("Unit ladder has no levels")]
    EmptyLadder,

    /// Two units claim the same level.
    #[error("Duplicate unit level: {level}")]
    DuplicateLevel {
        /// The repeated level.
        level: u32,
    },

    /// The same unit appears on two levels.
    #[error("Unit {unit_id} appears more than once")]
    DuplicateUnit {
        /// The repeated unit.
        unit_id: UnitId,
    },

    /// A non-top level has a zero or negative conversion factor.
    #[error("Invalid conversion factor {factor} at level {level}")]
    InvalidFactor {
        /// Level carrying the factor.
        level: u32,
        /// The rejected factor.
        factor: Decimal,
    },

    /// The unit is not part of this ladder.
    #[error("Unknown unit: {unit_id}")]
    UnknownUnit {
        /// The requested unit.
        unit_id: UnitId,
    },

    /// Conversion result does not fit in a decimal.
    #[error("Conversion overflow")]
    Overflow,
}

impl UnitError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyLadder => "EMPTY_UNIT_LADDER",
            Self::DuplicateLevel { .. } => "DUPLICATE_UNIT_LEVEL",
            Self::DuplicateUnit { .. } => "DUPLICATE_UNIT",
            Self::InvalidFactor { .. } => "INVALID_CONVERSION_FACTOR",
            Self::UnknownUnit { .. } => "UNKNOWN_UNIT",
            Self::Overflow => "CONVERSION_OVERFLOW",
        }
    }
}

impl From<UnitError> for AppError {
    fn from(err: UnitError) -> Self {
        match err {
            UnitError::UnknownUnit { .. } => Self::NotFound(err.to_string()),
            _ => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(UnitError::EmptyLadder, "EMPTY_UNIT_LADDER")]
    #[case(UnitError::DuplicateLevel { level: 2 }, "DUPLICATE_UNIT_LEVEL")]
    #[case(UnitError::DuplicateUnit { unit_id: UnitId::new(3) }, "DUPLICATE_UNIT")]
    #[case(UnitError::InvalidFactor { level: 2, factor: dec!(0) }, "INVALID_CONVERSION_FACTOR")]
    #[case(UnitError::UnknownUnit { unit_id: UnitId::new(9) }, "UNKNOWN_UNIT")]
    #[case(UnitError::Overflow, "CONVERSION_OVERFLOW")]
    fn test_error_codes(#[case] err: UnitError, #[case] code: &str) {
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = UnitError::InvalidFactor { level: 2, factor: dec!(-1) }.into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: AppError = UnitError::UnknownUnit { unit_id: UnitId::new(9) }.into();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }
}
