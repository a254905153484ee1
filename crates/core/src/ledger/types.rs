//! Ledger view domain types.
//!
//! These types carry already-posted entries from the backend into the
//! date-ordered, journal-grouped ledger shown on party, purchase, and account
//! ledger screens.

use chrono::NaiveDate;
use medistock_shared::types::{AccountId, BalanceSide, BalanceStatus, format_balance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One posted ledger line as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Journal number grouping lines that post together.
    pub journal_id: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Debit amount (non-negative).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (non-negative).
    #[serde(default)]
    pub credit: Decimal,
    /// Journal narration.
    #[serde(default)]
    pub description: String,
    /// Account shown on the line, e.g. `2100 – Suppliers`.
    #[serde(default)]
    pub account_label: String,
    /// Whether the journal was reversed. Reversed lines are flagged, not dropped.
    #[serde(default)]
    pub is_reversed: bool,
    /// Account the line posts to.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Originating document kind ("Purchase", "Payment", ...).
    #[serde(default)]
    pub source: Option<String>,
}

impl LedgerEntry {
    /// Creates an entry with empty display fields.
    #[must_use]
    pub fn new(
        journal_id: impl Into<String>,
        date: NaiveDate,
        debit: Decimal,
        credit: Decimal,
    ) -> Self {
        Self {
            journal_id: journal_id.into(),
            date,
            debit,
            credit,
            description: String::new(),
            account_label: String::new(),
            is_reversed: false,
            account_id: None,
            source: None,
        }
    }

    /// Sets the narration.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the account the line posts to.
    #[must_use]
    pub fn with_account(mut self, account_id: AccountId, label: impl Into<String>) -> Self {
        self.account_id = Some(account_id);
        self.account_label = label.into();
        self
    }

    /// Marks the line as part of a reversed journal.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        self.is_reversed = true;
        self
    }

    /// Debit minus credit.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.debit - self.credit
    }
}

/// Stored opening balance of an account or party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningBalance {
    /// Magnitude.
    pub amount: Decimal,
    /// Dr or Cr.
    pub side: BalanceSide,
}

impl OpeningBalance {
    /// Creates an opening balance.
    #[must_use]
    pub const fn new(amount: Decimal, side: BalanceSide) -> Self {
        Self { amount, side }
    }

    /// Signed value: Dr positive, Cr negative.
    #[must_use]
    pub fn signed(&self) -> Decimal {
        self.side.signed(self.amount)
    }
}

/// A ledger entry with the running balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedEntry {
    /// The source entry.
    #[serde(flatten)]
    pub entry: LedgerEntry,
    /// Running balance after this entry (positive = Dr).
    pub balance: Decimal,
}

impl AnnotatedEntry {
    /// Side of the running balance.
    #[must_use]
    pub fn balance_side(&self) -> BalanceSide {
        BalanceSide::from_signed(self.balance)
    }

    /// Running balance as shown in the table, e.g. `1,500 Dr`.
    #[must_use]
    pub fn display_balance(&self) -> String {
        format_balance(self.balance)
    }
}

/// Data-integrity problem found on a journal. Non-fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalAnomaly {
    /// Debits and credits of the journal differ.
    Unbalanced {
        /// Sum of debits.
        debit: Decimal,
        /// Sum of credits.
        credit: Decimal,
        /// Debit minus credit.
        difference: Decimal,
    },
}

/// All lines of one journal, in chronological position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerGroup {
    /// Journal number.
    pub journal_id: String,
    /// Date of the first member.
    pub date: NaiveDate,
    /// Narration of the first member.
    pub description: String,
    /// Document kind of the first member.
    pub source: Option<String>,
    /// True if any member belongs to a reversed journal.
    pub is_reversed: bool,
    /// Members in chronological order.
    pub entries: Vec<AnnotatedEntry>,
    /// Sum of member debits.
    pub total_debit: Decimal,
    /// Sum of member credits.
    pub total_credit: Decimal,
    /// Running balance of the last member.
    pub closing_balance: Decimal,
    /// Set when the journal does not balance.
    pub anomaly: Option<JournalAnomaly>,
}

impl LedgerGroup {
    /// Rows the merged date/journal cells span.
    #[must_use]
    pub fn row_span(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no anomaly was flagged.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.anomaly.is_none()
    }
}

/// Ledger totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    /// Signed opening balance the fold started from.
    pub opening_balance: Decimal,
    /// Sum of all debits.
    pub total_debit: Decimal,
    /// Sum of all credits.
    pub total_credit: Decimal,
    /// Last running balance, or the opening balance when there are no entries.
    pub closing_balance: Decimal,
}

impl LedgerSummary {
    /// Side of the closing balance.
    #[must_use]
    pub fn closing_side(&self) -> BalanceSide {
        BalanceSide::from_signed(self.closing_balance)
    }

    /// Receivable / Payable / Nil, from the same sign as `closing_side`.
    #[must_use]
    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_signed(self.closing_balance)
    }
}

/// Fully assembled ledger ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Chronological rows with running balances.
    pub rows: Vec<AnnotatedEntry>,
    /// Rows grouped by journal.
    pub groups: Vec<LedgerGroup>,
    /// Totals.
    pub summary: LedgerSummary,
}

impl LedgerView {
    /// Groups flagged with an anomaly.
    pub fn anomalies(&self) -> impl Iterator<Item = &LedgerGroup> {
        self.groups.iter().filter(|group| !group.is_balanced())
    }
}
