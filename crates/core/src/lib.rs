//! Core business logic for Medistock.
//!
//! This crate contains pure transforms with ZERO web or database dependencies.
//! Records come in already fetched; views go out ready to render.
//!
//! # Modules
//!
//! - `tree` - Hierarchy projection for categories, accounts, and locations
//! - `ledger` - Date-ordered, journal-grouped ledgers with running balances
//! - `units` - Packing unit ladders and unit price conversion
//! - `pricing` - Line totals and VAT
//! - `expiry` - Batch expiry resolution and classification

pub mod expiry;
pub mod ledger;
pub mod pricing;
pub mod tree;
pub mod units;
