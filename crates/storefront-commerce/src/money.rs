//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation to avoid floating-point
//! precision issues in monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Chilean peso, the catalog's native currency.
    #[default]
    CLP,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "CLP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CLP => "CLP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::CLP => "$",
            Currency::USD => "US$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::CLP => 0,
            _ => 2,
        }
    }

    /// Separator placed between groups of three integer digits.
    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::CLP | Currency::EUR => '.',
            Currency::USD => ',',
        }
    }

    /// Separator between the integer and fractional part.
    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::CLP | Currency::EUR => ',',
            Currency::USD => '.',
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "CLP" => Some(Currency::CLP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (whole pesos
/// for CLP, cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Format as a display string with grouped digits (e.g., "$12.500").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.display_amount())
    }

    /// Format the absolute amount without symbol (e.g., "12.500").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let abs = self.amount_minor.unsigned_abs();
        let whole = group_digits(abs / divisor, self.currency.thousands_separator());
        if places == 0 {
            whole
        } else {
            format!(
                "{}{}{:0width$}",
                whole,
                self.currency.decimal_separator(),
                abs % divisor,
                width = places as usize
            )
        }
    }

    /// Add another Money value, returning None if currencies don't match.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.saturating_add(other.amount_minor),
            self.currency,
        ))
    }

    /// Subtract another Money value, returning None if currencies don't match.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.saturating_sub(other.amount_minor),
            self.currency,
        ))
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }

    /// Sum an iterator of Money values, skipping foreign currencies.
    pub fn sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.filter(|m| m.currency == currency)
            .fold(Money::zero(currency), |acc, m| {
                Money::new(acc.amount_minor.saturating_add(m.amount_minor), currency)
            })
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match. Use `try_add` for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("Currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch in subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clp_display_groups_thousands() {
        assert_eq!(Money::new(1_234_567, Currency::CLP).display(), "$1.234.567");
        assert_eq!(Money::new(900, Currency::CLP).display(), "$900");
        assert_eq!(Money::new(0, Currency::CLP).display(), "$0");
    }

    #[test]
    fn test_usd_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "US$49.99");
        assert_eq!(Money::new(123_456_05, Currency::USD).display(), "US$123,456.05");
    }

    #[test]
    fn test_negative_display() {
        assert_eq!(Money::new(-2500, Currency::CLP).display(), "-$2.500");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(1000, Currency::CLP);
        let b = Money::new(300, Currency::CLP);
        assert_eq!((a + b).amount_minor, 1300);
        assert_eq!((a - b).amount_minor, 700);
        assert_eq!((a * 3).amount_minor, 3000);
    }

    #[test]
    fn test_multiply_saturates() {
        let m = Money::new(i64::MAX / 2, Currency::CLP);
        assert_eq!(m.multiply(4).amount_minor, i64::MAX);
    }

    #[test]
    fn test_sum() {
        let values = [
            Money::new(100, Currency::CLP),
            Money::new(250, Currency::CLP),
        ];
        assert_eq!(Money::sum(values.iter(), Currency::CLP).amount_minor, 350);
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_money_currency_mismatch() {
        let clp = Money::new(1000, Currency::CLP);
        let eur = Money::new(1000, Currency::EUR);
        let _ = clp + eur;
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("clp"), Some(Currency::CLP));
        assert_eq!(Currency::from_code("EUR"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("JPY"), None);
    }
}
