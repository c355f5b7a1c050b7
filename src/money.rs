//! Money
//!
//! Integer minor-unit amounts and rupee display formatting.
//! The backend speaks JSON numbers; everything is converted to paise at the
//! boundary so sums and tax never accumulate float error. Arithmetic
//! saturates at the `i64` bounds instead of overflowing.

use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// Amount in paise (1/100 rupee)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money::from_paise(0);

    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Convert a rupee amount. NaN and infinities become zero.
    pub fn from_amount(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::ZERO;
        }
        Money((amount * 100.0).round() as i64)
    }

    pub const fn paise(&self) -> i64 {
        self.0
    }

    pub fn as_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by a (possibly fractional) quantity, e.g. 1.5 litres of oil.
    pub fn times(&self, quantity: f64) -> Money {
        if !quantity.is_finite() {
            return Money::ZERO;
        }
        Money((self.0 as f64 * quantity).round() as i64)
    }

    /// Percentage in basis points, rounded half-up (1800 = 18%).
    pub fn percentage(&self, bps: u32) -> Money {
        let scaled = self.0 as i128 * bps as i128;
        let rounded = if scaled >= 0 {
            (scaled + 5000) / 10000
        } else {
            (scaled - 5000) / 10000
        };
        Money(rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    pub fn max(self, other: Money) -> Money {
        if self.0 >= other.0 { self } else { other }
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}₹{}.{:02}", sign, group_indian(abs / 100), abs % 100)
    }
}

/// Indian digit grouping: last three digits, then pairs (12,34,567).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Format an optional amount for display. Missing or non-numeric values show as zero.
pub fn format_currency(amount: Option<f64>) -> String {
    Money::from_amount(amount.unwrap_or(0.0)).to_string()
}

/// Parse user input into a rupee amount. Malformed input is zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '₹' | ',' | ' '))
        .collect();
    let cleaned = cleaned.strip_prefix("Rs.").unwrap_or(&cleaned);
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_missing_and_invalid_as_zero() {
        assert_eq!(format_currency(None), "₹0.00");
        assert_eq!(format_currency(Some(f64::NAN)), "₹0.00");
        assert_eq!(format_currency(Some(f64::INFINITY)), "₹0.00");
        assert_eq!(format_currency(Some(parse_amount("abc"))), "₹0.00");
    }

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_currency(Some(0.5)), "₹0.50");
        assert_eq!(format_currency(Some(999.0)), "₹999.00");
        assert_eq!(format_currency(Some(1000.0)), "₹1,000.00");
        assert_eq!(format_currency(Some(123456.5)), "₹1,23,456.50");
        assert_eq!(format_currency(Some(12345678.0)), "₹1,23,45,678.00");
        assert_eq!(format_currency(Some(-500.0)), "-₹500.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 1,250.75 "), 1250.75);
        assert_eq!(parse_amount("₹300"), 300.0);
        assert_eq!(parse_amount("Rs.40"), 40.0);
        assert_eq!(parse_amount("12abc"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        // 18% of 0.25 = 0.045 -> 0.05
        assert_eq!(Money::from_paise(25).percentage(1800).paise(), 5);
        assert_eq!(Money::from_amount(1000.0).percentage(1800), Money::from_amount(180.0));
    }

    #[test]
    fn test_times_fractional_quantity() {
        let litre = Money::from_amount(420.0);
        assert_eq!(litre.times(1.5), Money::from_amount(630.0));
        assert_eq!(litre.times(f64::NAN), Money::ZERO);
    }
}
