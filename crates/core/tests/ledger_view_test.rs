//! Integration tests for ledger assembly.
//!
//! Runs a supplier ledger export through the public assembler API.

use medistock_core::ledger::{JournalAnomaly, LedgerAssembler, LedgerEntry, OpeningBalance};
use medistock_shared::config::LedgerConfig;
use medistock_shared::types::{AccountId, BalanceSide, BalanceStatus, format_balance};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PartyLedgerExport {
    opening_balance: Option<OpeningBalance>,
    entries: Vec<LedgerEntry>,
}

const SUPPLIER_ACCOUNT: AccountId = AccountId::new(2101);

fn supplier_ledger() -> PartyLedgerExport {
    let json = r#"{
        "opening_balance": { "amount": "5000", "side": "cr" },
        "entries": [
            { "journal_id": "PAY-0007", "date": "2024-04-20", "debit": "8000", "credit": "0",
              "description": "Payment to Himalayan Pharma",
              "account_label": "2101 Himalayan Pharma",
              "account_id": 2101, "source": "Payment" },
            { "journal_id": "PAY-0007", "date": "2024-04-20", "debit": "0", "credit": "8000",
              "description": "Payment to Himalayan Pharma", "account_label": "1010 Cash",
              "account_id": 1010, "source": "Payment" },
            { "journal_id": "PUR-0012", "date": "2024-04-02", "debit": "11300", "credit": "0",
              "description": "Purchase INV-554", "account_label": "1200 Inventory",
              "account_id": 1200, "source": "Purchase" },
            { "journal_id": "PUR-0012", "date": "2024-04-02", "debit": "0", "credit": "11300",
              "description": "Purchase INV-554", "account_label": "2101 Himalayan Pharma",
              "account_id": 2101, "source": "Purchase" },
            { "journal_id": "RET-0002", "date": "2024-04-25", "debit": "500", "credit": "0",
              "description": "Purchase return", "account_label": "2101 Himalayan Pharma",
              "account_id": 2101, "is_reversed": true },
            { "journal_id": "RET-0002", "date": "2024-04-25", "debit": "0", "credit": "450",
              "description": "Purchase return", "account_label": "1200 Inventory",
              "account_id": 1200, "is_reversed": true }
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// Test 1: Chronological order and running balance from a credit opening
// ============================================================================
#[test]
fn test_running_balance_from_credit_opening() {
    let export = supplier_ledger();
    let view = LedgerAssembler::default().assemble(export.entries, export.opening_balance.as_ref());

    let journals: Vec<&str> = view.rows.iter().map(|row| row.entry.journal_id.as_str()).collect();
    assert_eq!(
        journals,
        vec!["PUR-0012", "PUR-0012", "PAY-0007", "PAY-0007", "RET-0002", "RET-0002"]
    );

    let balances: Vec<Decimal> = view.rows.iter().map(|row| row.balance).collect();
    assert_eq!(
        balances,
        vec![dec!(6300), dec!(-5000), dec!(3000), dec!(-5000), dec!(-4500), dec!(-4950)]
    );
    assert_eq!(view.rows[0].display_balance(), "6,300 Dr");
}

// ============================================================================
// Test 2: Journal groups, reversal flag, and anomalies
// ============================================================================
#[test]
fn test_journal_groups() {
    let export = supplier_ledger();
    let view = LedgerAssembler::default().assemble(export.entries, export.opening_balance.as_ref());

    assert_eq!(view.groups.len(), 3);
    let purchase = &view.groups[0];
    assert_eq!(purchase.journal_id, "PUR-0012");
    assert_eq!(purchase.source.as_deref(), Some("Purchase"));
    assert_eq!(purchase.row_span(), 2);
    assert!(purchase.is_balanced());
    assert!(!purchase.is_reversed);

    let anomalies: Vec<_> = view.anomalies().collect();
    assert_eq!(anomalies.len(), 1);
    assert_eq!(anomalies[0].journal_id, "RET-0002");
    assert!(anomalies[0].is_reversed);
    assert_eq!(
        anomalies[0].anomaly,
        Some(JournalAnomaly::Unbalanced {
            debit: dec!(500),
            credit: dec!(450),
            difference: dec!(50),
        })
    );
}

// ============================================================================
// Test 3: Summary totals and status
// ============================================================================
#[test]
fn test_summary() {
    let export = supplier_ledger();
    let view = LedgerAssembler::default().assemble(export.entries, export.opening_balance.as_ref());

    assert_eq!(view.summary.opening_balance, dec!(-5000));
    assert_eq!(view.summary.total_debit, dec!(19800));
    assert_eq!(view.summary.total_credit, dec!(19750));
    assert_eq!(view.summary.closing_balance, dec!(-4950));
    assert_eq!(view.summary.closing_side(), BalanceSide::Cr);
    assert_eq!(view.summary.status(), BalanceStatus::Payable);
    assert_eq!(format_balance(view.summary.closing_balance), "4,950 Cr");
}

// ============================================================================
// Test 4: Tolerance from configuration
// ============================================================================
#[test]
fn test_tolerance_absorbs_small_difference() {
    let export = supplier_ledger();
    let assembler = LedgerAssembler::new(&LedgerConfig {
        balance_tolerance: dec!(50),
    });
    let view = assembler.assemble(export.entries, export.opening_balance.as_ref());
    assert_eq!(view.anomalies().count(), 0);
}

// ============================================================================
// Test 5: Outstanding balance of the supplier account
// ============================================================================
#[test]
fn test_supplier_outstanding() {
    let export = supplier_ledger();
    let outstanding = LedgerAssembler::outstanding_balance(&export.entries, SUPPLIER_ACCOUNT);

    // -11300 purchase + 8000 payment + 500 return
    assert_eq!(outstanding, dec!(-2800));
    assert_eq!(BalanceStatus::from_signed(outstanding), BalanceStatus::Payable);
}
