//! Packing unit ladders and unit price conversion.

pub mod error;
pub mod ladder;

pub use error::UnitError;
pub use ladder::{PRICE_DECIMAL_PLACES, UnitLadder, UnitLevel};
