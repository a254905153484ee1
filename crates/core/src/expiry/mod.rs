//! Batch expiry resolution and classification.

pub mod rule;
pub mod status;

pub use rule::{ExpiryInput, ExpiryMode, ExpiryRule, ShelfLifeUnit, resolve_expiry};
pub use status::{ExpiryPolicy, ExpiryStatus, days_until_expiry};
