//! Running balance calculation.
//!
//! Sign convention: balance += debit - credit, so a positive balance is
//! debit-normal (Dr) and a negative one credit-normal (Cr).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running balance at one position of a ledger.
///
/// - position: 0 for the opening balance, N for the Nth entry
/// - previous_balance: balance before this entry
/// - current_balance: balance after this entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Entry position (0 = opening).
    pub position: usize,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// The starting point of a ledger, seeded with a signed opening balance.
    #[must_use]
    pub fn opening(balance: Decimal) -> Self {
        Self {
            position: 0,
            previous_balance: balance,
            current_balance: balance,
        }
    }

    /// The balance after posting one more entry.
    ///
    /// - current_balance[N] = current_balance[N-1] + debit - credit
    /// - previous_balance[N] = current_balance[N-1]
    #[must_use]
    pub fn next_entry(&self, debit: Decimal, credit: Decimal) -> Self {
        Self {
            position: self.position + 1,
            previous_balance: self.current_balance,
            current_balance: self.current_balance + debit - credit,
        }
    }
}
