//! Sale and purchase line pricing.
//!
//! Sale amounts are kept at full decimal precision. Purchases round each
//! line's VAT to two places before summing.

pub mod line;

pub use line::{
    InvoiceTotals, LineItem, VAT_DECIMAL_PLACES, VatRounding, grand_total, line_total, summarize,
    vat_amount,
};
