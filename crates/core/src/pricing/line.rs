//! Line totals and VAT.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// One priced line on a sale or purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Quantity in the line's unit.
    pub quantity: Decimal,
    /// Price per unit, before VAT.
    #[serde(alias = "selling_price", alias = "cost_price")]
    pub unit_price: Decimal,
    /// Whether VAT is charged on this line.
    #[serde(default)]
    pub vat_included: bool,
}

impl LineItem {
    /// Creates a line.
    #[must_use]
    pub const fn new(quantity: Decimal, unit_price: Decimal, vat_included: bool) -> Self {
        Self {
            quantity,
            unit_price,
            vat_included,
        }
    }

    /// Quantity times unit price.
    #[must_use]
    pub fn base_amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// VAT charged on a line; zero when the line carries no VAT.
#[must_use]
pub fn vat_amount(item: &LineItem, vat_rate: Decimal) -> Decimal {
    if item.vat_included {
        item.base_amount() * vat_rate
    } else {
        Decimal::ZERO
    }
}

/// Line total: `quantity * unit_price * (1 + vat_rate)` with VAT, else
/// `quantity * unit_price`.
#[must_use]
pub fn line_total(item: &LineItem, vat_rate: Decimal) -> Decimal {
    item.base_amount() + vat_amount(item, vat_rate)
}

/// Sum of line totals.
#[must_use]
pub fn grand_total(items: &[LineItem], vat_rate: Decimal) -> Decimal {
    items.iter().map(|item| line_total(item, vat_rate)).sum()
}

/// Decimal places of a rounded VAT line.
pub const VAT_DECIMAL_PLACES: u32 = 2;

/// How line VAT is summed into invoice totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatRounding {
    /// Full precision (sales).
    #[default]
    Exact,
    /// Each line's VAT rounded to two places before summing (purchases).
    PerLine,
}

impl VatRounding {
    fn apply(self, vat: Decimal) -> Decimal {
        match self {
            Self::Exact => vat,
            Self::PerLine => vat.round_dp_with_strategy(
                VAT_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            ),
        }
    }
}

/// Totals shown under an item table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    /// Sum of base amounts.
    pub subtotal: Decimal,
    /// Sum of VAT.
    pub vat: Decimal,
    /// `subtotal + vat`.
    pub total: Decimal,
    /// Discount taken off the total.
    pub discount: Decimal,
    /// `total - discount`, never below zero.
    pub net_payable: Decimal,
}

/// Subtotal, VAT, grand total, and net payable of a set of lines.
#[must_use]
pub fn summarize(
    items: &[LineItem],
    vat_rate: Decimal,
    rounding: VatRounding,
    discount: Decimal,
) -> InvoiceTotals {
    let subtotal: Decimal = items.iter().map(LineItem::base_amount).sum();
    let vat: Decimal = items
        .iter()
        .map(|item| rounding.apply(vat_amount(item, vat_rate)))
        .sum();
    let total = subtotal + vat;

    InvoiceTotals {
        subtotal,
        vat,
        total,
        discount,
        net_payable: (total - discount).max(Decimal::ZERO),
    }
}
