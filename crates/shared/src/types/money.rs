//! Balance sides and amount formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`.
//!
//! Sign convention used everywhere: a positive balance is debit-normal (Dr),
//! a negative balance is credit-normal (Cr).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Side of a balance: debit or credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    /// Debit side.
    Dr,
    /// Credit side.
    Cr,
}

impl BalanceSide {
    /// Side of a signed balance. Zero counts as Dr.
    #[must_use]
    pub fn from_signed(balance: Decimal) -> Self {
        if balance.is_sign_negative() && !balance.is_zero() {
            Self::Cr
        } else {
            Self::Dr
        }
    }

    /// Applies this side to an unsigned magnitude: Dr is positive, Cr negative.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Dr => amount.abs(),
            Self::Cr => -amount.abs(),
        }
    }
}

impl std::fmt::Display for BalanceSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dr => write!(f, "Dr"),
            Self::Cr => write!(f, "Cr"),
        }
    }
}

impl std::str::FromStr for BalanceSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dr" | "debit" => Ok(Self::Dr),
            "cr" | "credit" => Ok(Self::Cr),
            _ => Err(format!("Unknown balance side: {s}")),
        }
    }
}

/// Payment status of a party derived from its signed balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStatus {
    /// The party owes us (debit balance).
    Receivable,
    /// We owe the party (credit balance).
    Payable,
    /// Settled.
    Nil,
}

impl BalanceStatus {
    /// Status of a signed balance.
    #[must_use]
    pub fn from_signed(balance: Decimal) -> Self {
        if balance.is_zero() {
            Self::Nil
        } else if balance.is_sign_positive() {
            Self::Receivable
        } else {
            Self::Payable
        }
    }
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receivable => write!(f, "Receivable"),
            Self::Payable => write!(f, "Payable"),
            Self::Nil => write!(f, "Nil Balance"),
        }
    }
}

/// Formats an amount with South Asian digit grouping (`12,34,567.50`).
///
/// Whole amounts print without decimals; fractional amounts are rounded to
/// two places.
#[must_use]
pub fn format_grouped(amount: Decimal) -> String {
    let fixed = if amount.fract().is_zero() {
        non_negative_zero(amount.trunc()).to_string()
    } else {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{:.2}", non_negative_zero(rounded))
    };

    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match integer.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", integer),
    };

    let mut out = String::with_capacity(fixed.len() + 8);
    out.push_str(sign);
    out.push_str(&group_digits(digits));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats a signed balance as its magnitude plus side, e.g. `1,500 Dr`.
#[must_use]
pub fn format_balance(balance: Decimal) -> String {
    format!(
        "{} {}",
        format_grouped(balance.abs()),
        BalanceSide::from_signed(balance)
    )
}

// Rounding keeps the sign of amounts that round to zero.
fn non_negative_zero(amount: Decimal) -> Decimal {
    if amount.is_zero() {
        Decimal::ZERO
    } else {
        amount
    }
}

// Last three digits form one group, the rest are grouped in pairs.
fn group_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut pairs = Vec::with_capacity(head.len() / 2 + 1);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        pairs.push(&head[start..end]);
        end = start;
    }
    pairs.reverse();

    format!("{},{tail}", pairs.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[rstest]
    #[case(dec!(0), "0")]
    #[case(dec!(999), "999")]
    #[case(dec!(1000), "1,000")]
    #[case(dec!(100000), "1,00,000")]
    #[case(dec!(1234567), "12,34,567")]
    #[case(dec!(1234567.5), "12,34,567.50")]
    #[case(dec!(-1234567), "-12,34,567")]
    #[case(dec!(100.00), "100")]
    #[case(dec!(10.005), "10.01")]
    #[case(dec!(-0.001), "0.00")]
    #[case(dec!(-0.005), "-0.01")]
    fn test_format_grouped(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(format_grouped(amount), expected);
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(dec!(1500)), "1,500 Dr");
        assert_eq!(format_balance(dec!(-40)), "40 Cr");
        assert_eq!(format_balance(Decimal::ZERO), "0 Dr");
    }

    #[test]
    fn test_balance_side_from_signed() {
        assert_eq!(BalanceSide::from_signed(dec!(300)), BalanceSide::Dr);
        assert_eq!(BalanceSide::from_signed(dec!(-0.01)), BalanceSide::Cr);
        assert_eq!(BalanceSide::from_signed(Decimal::ZERO), BalanceSide::Dr);
    }

    #[test]
    fn test_balance_side_signed() {
        assert_eq!(BalanceSide::Dr.signed(dec!(500)), dec!(500));
        assert_eq!(BalanceSide::Cr.signed(dec!(500)), dec!(-500));
    }

    #[test]
    fn test_balance_side_from_str() {
        assert_eq!(BalanceSide::from_str("dr").unwrap(), BalanceSide::Dr);
        assert_eq!(BalanceSide::from_str("CR").unwrap(), BalanceSide::Cr);
        assert_eq!(BalanceSide::from_str("credit").unwrap(), BalanceSide::Cr);
        assert!(BalanceSide::from_str("x").is_err());
    }

    #[test]
    fn test_balance_side_serde() {
        assert_eq!(serde_json::to_string(&BalanceSide::Dr).unwrap(), "\"dr\"");
        let side: BalanceSide = serde_json::from_str("\"cr\"").unwrap();
        assert_eq!(side, BalanceSide::Cr);
    }

    #[test]
    fn test_balance_status() {
        assert_eq!(BalanceStatus::from_signed(dec!(10)), BalanceStatus::Receivable);
        assert_eq!(BalanceStatus::from_signed(dec!(-10)), BalanceStatus::Payable);
        assert_eq!(BalanceStatus::from_signed(Decimal::ZERO), BalanceStatus::Nil);
        assert_eq!(BalanceStatus::Nil.to_string(), "Nil Balance");
    }
}
