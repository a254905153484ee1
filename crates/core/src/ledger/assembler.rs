//! Ledger assembly: sort, running balance, journal grouping, totals.

use std::collections::HashMap;

use medistock_shared::config::LedgerConfig;
use medistock_shared::types::AccountId;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::balance::RunningBalance;
use super::types::{
    AnnotatedEntry, JournalAnomaly, LedgerEntry, LedgerGroup, LedgerSummary, LedgerView,
    OpeningBalance,
};

/// Builds display ledgers from posted entries.
///
/// The backend is the system of record; nothing here re-posts or corrects
/// data. Unbalanced journals are flagged and assembly continues.
#[derive(Debug, Clone)]
pub struct LedgerAssembler {
    balance_tolerance: Decimal,
}

impl Default for LedgerAssembler {
    fn default() -> Self {
        Self::new(&LedgerConfig::default())
    }
}

impl LedgerAssembler {
    /// Creates an assembler from configuration.
    #[must_use]
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            balance_tolerance: config.balance_tolerance.abs(),
        }
    }

    /// Sorts entries by date, ascending.
    ///
    /// The sort is stable: entries on the same date keep their input order,
    /// since the data carries no intra-day sequence.
    #[must_use]
    pub fn sort_chronological(mut entries: Vec<LedgerEntry>) -> Vec<LedgerEntry> {
        entries.sort_by_key(|entry| entry.date);
        entries
    }

    /// Attaches the running balance to each entry, in the given order.
    ///
    /// The fold starts from the signed opening balance (Dr positive, Cr
    /// negative), or zero when there is none.
    #[must_use]
    pub fn accumulate_balance(
        sorted: Vec<LedgerEntry>,
        opening: Option<&OpeningBalance>,
    ) -> Vec<AnnotatedEntry> {
        let seed = opening.map_or(Decimal::ZERO, OpeningBalance::signed);
        let mut running = RunningBalance::opening(seed);

        sorted
            .into_iter()
            .map(|entry| {
                running = running.next_entry(entry.debit, entry.credit);
                AnnotatedEntry {
                    entry,
                    balance: running.current_balance,
                }
            })
            .collect()
    }

    /// Groups annotated entries by journal, in order of first appearance.
    ///
    /// Members need not be adjacent. A group's date, narration, and source come
    /// from its first member; its closing balance from its last.
    #[must_use]
    pub fn group_by_journal(&self, annotated: &[AnnotatedEntry]) -> Vec<LedgerGroup> {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<LedgerGroup> = Vec::new();

        for row in annotated {
            let journal_id = row.entry.journal_id.as_str();
            let index = *position.entry(journal_id).or_insert_with(|| {
                groups.push(LedgerGroup {
                    journal_id: row.entry.journal_id.clone(),
                    date: row.entry.date,
                    description: row.entry.description.clone(),
                    source: row.entry.source.clone(),
                    is_reversed: false,
                    entries: Vec::new(),
                    total_debit: Decimal::ZERO,
                    total_credit: Decimal::ZERO,
                    closing_balance: row.balance,
                    anomaly: None,
                });
                groups.len() - 1
            });

            let group = &mut groups[index];
            group.is_reversed |= row.entry.is_reversed;
            group.total_debit += row.entry.debit;
            group.total_credit += row.entry.credit;
            group.closing_balance = row.balance;
            group.entries.push(row.clone());
        }

        for group in &mut groups {
            group.anomaly = self.check_balanced(group);
        }

        groups
    }

    /// Totals over all entries.
    #[must_use]
    pub fn summarize(
        annotated: &[AnnotatedEntry],
        opening: Option<&OpeningBalance>,
    ) -> LedgerSummary {
        let opening_balance = opening.map_or(Decimal::ZERO, OpeningBalance::signed);

        LedgerSummary {
            opening_balance,
            total_debit: annotated.iter().map(|row| row.entry.debit).sum(),
            total_credit: annotated.iter().map(|row| row.entry.credit).sum(),
            closing_balance: annotated.last().map_or(opening_balance, |row| row.balance),
        }
    }

    /// Sorts, accumulates, groups, and summarizes in one call.
    #[must_use]
    pub fn assemble(
        &self,
        entries: Vec<LedgerEntry>,
        opening: Option<&OpeningBalance>,
    ) -> LedgerView {
        let rows = Self::accumulate_balance(Self::sort_chronological(entries), opening);
        let groups = self.group_by_journal(&rows);
        let summary = Self::summarize(&rows, opening);

        debug!(
            rows = rows.len(),
            groups = groups.len(),
            closing_balance = %summary.closing_balance,
            "Assembled ledger"
        );

        LedgerView {
            rows,
            groups,
            summary,
        }
    }

    /// Signed outstanding balance of one account across the given entries.
    ///
    /// Uses the ledger sign convention: positive means the account carries a
    /// debit balance (receivable), negative a credit balance (payable).
    #[must_use]
    pub fn outstanding_balance(entries: &[LedgerEntry], account_id: AccountId) -> Decimal {
        entries
            .iter()
            .filter(|entry| entry.account_id == Some(account_id))
            .map(LedgerEntry::net)
            .sum()
    }

    fn check_balanced(&self, group: &LedgerGroup) -> Option<JournalAnomaly> {
        let difference = group.total_debit - group.total_credit;
        if difference.abs() <= self.balance_tolerance {
            return None;
        }

        warn!(
            journal_id = %group.journal_id,
            debit = %group.total_debit,
            credit = %group.total_credit,
            "Journal does not balance"
        );

        Some(JournalAnomaly::Unbalanced {
            debit: group.total_debit,
            credit: group.total_credit,
            difference,
        })
    }
}
