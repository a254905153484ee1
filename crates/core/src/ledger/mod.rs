//! Ledger view assembly.
//!
//! This module turns posted entries into the ledger shown on party, purchase,
//! and account screens:
//! - Chronological ordering (stable within a day)
//! - Running balance seeded from the opening balance
//! - Journal grouping with per-journal totals and balance checks
//! - Totals and outstanding balances

pub mod assembler;
pub mod balance;
pub mod types;


pub use assembler::LedgerAssembler;
pub use balance::RunningBalance;
pub use types::{
    AnnotatedEntry, JournalAnomaly, LedgerEntry, LedgerGroup, LedgerSummary, LedgerView,
    OpeningBalance,
};
