//! Monetary amounts with currency information.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code used when an order exposes no subtotal currency.
///
/// Matches what the backend quotes for orders created before multi-currency
/// support was enabled on the store.
pub const DEFAULT_CURRENCY: &str = "BDT";

/// Monetary amount with currency code.
///
/// Amounts travel as decimal strings on the wire (e.g. `"49.99"`) and are
/// held as [`Decimal`] in memory so arithmetic never goes through floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount (serialized as a string, preserving precision).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub fn zero(currency_code: &str) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code: currency_code.to_string(),
        }
    }

    /// The amount rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            amount: self.amount.round_dp(2),
            currency_code: self.currency_code.clone(),
        }
    }

    /// Format the amount as a fixed two-decimal string (e.g. `"55.00"`).
    #[must_use]
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.to_fixed(), self.currency_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_to_fixed_pads_decimals() {
        let money = Money::new(dec("5"), "USD".to_string());
        assert_eq!(money.to_fixed(), "5.00");

        let money = Money::new(dec("5.5"), "USD".to_string());
        assert_eq!(money.to_fixed(), "5.50");
    }

    #[test]
    fn test_rounded_two_places() {
        let money = Money::new(dec("10.012"), "USD".to_string());
        assert_eq!(money.rounded().amount, dec("10.01"));
        assert_eq!(money.rounded().to_fixed(), "10.01");
    }

    #[test]
    fn test_serde_round_trip_camel_case() {
        let json = r#"{"amount":"49.99","currencyCode":"EUR"}"#;
        let money: Money = serde_json::from_str(json).unwrap();
        assert_eq!(money.amount, dec("49.99"));
        assert_eq!(money.currency_code, "EUR");

        let out = serde_json::to_string(&money).unwrap();
        assert!(out.contains("currencyCode"));
    }
}
