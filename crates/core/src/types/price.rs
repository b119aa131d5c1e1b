//! Price handling policy.
//!
//! Prices are `rust_decimal::Decimal` values carried as plain JSON numbers on
//! the wire. The remote API is not strict about them: a record may omit the
//! price or carry `null`. All of that leniency is confined to this one
//! module - the [`lenient`] serde adapter coerces anything missing, null, or
//! negative to zero at the deserialization boundary, so every consumer
//! downstream can assume a present, non-negative price.

use rust_decimal::Decimal;

/// Serde adapter for price fields: serializes as a JSON number, deserializes
/// leniently (missing/null/NaN/negative all become zero).
///
/// Use together with `#[serde(default)]` so an absent field also lands on
/// zero:
///
/// ```rust,ignore
/// #[serde(default, with = "loomline_core::types::price::lenient")]
/// pub price: Decimal,
/// ```
pub mod lenient {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a price as a JSON number.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        rust_decimal::serde::float::serialize(value, serializer)
    }

    /// Deserialize a price, coercing null/NaN/negative values to zero.
    ///
    /// # Errors
    ///
    /// Returns an error only if the value is present and not a number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<f64>::deserialize(deserializer)?;
        Ok(super::coerce(raw))
    }
}

/// Coerce a raw wire price to the canonical form: missing, unrepresentable,
/// and negative values all become zero.
#[must_use]
pub fn coerce(raw: Option<f64>) -> Decimal {
    raw.and_then(Decimal::from_f64_retain)
        .filter(|price| !price.is_sign_negative())
        .unwrap_or_default()
}

/// Format a price for display, e.g. `Ksh 1,250.00`.
#[must_use]
pub fn display(price: Decimal) -> String {
    let rounded = price.round_dp(2);
    let unsigned = format!("{:.2}", rounded.abs());
    let (whole, cents) = unsigned.split_once('.').unwrap_or((unsigned.as_str(), "00"));

    // Insert thousands separators into the integer part.
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("Ksh {sign}{grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Priced {
        #[serde(default, with = "lenient")]
        price: Decimal,
    }

    #[test]
    fn test_lenient_accepts_numbers() {
        let p: Priced = serde_json::from_str(r#"{"price": 1250.5}"#).expect("number");
        assert_eq!(p.price, Decimal::new(12505, 1));
    }

    #[test]
    fn test_lenient_missing_and_null_become_zero() {
        let p: Priced = serde_json::from_str("{}").expect("missing");
        assert_eq!(p.price, Decimal::ZERO);

        let p: Priced = serde_json::from_str(r#"{"price": null}"#).expect("null");
        assert_eq!(p.price, Decimal::ZERO);
    }

    #[test]
    fn test_lenient_negative_becomes_zero() {
        let p: Priced = serde_json::from_str(r#"{"price": -4.0}"#).expect("negative");
        assert_eq!(p.price, Decimal::ZERO);
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Priced {
            price: Decimal::new(45, 0),
        })
        .expect("serialize");
        assert_eq!(json, r#"{"price":45.0}"#);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(display(Decimal::new(125000, 2)), "Ksh 1,250.00");
        assert_eq!(display(Decimal::new(5, 0)), "Ksh 5.00");
        assert_eq!(display(Decimal::new(1234567891, 2)), "Ksh 12,345,678.91");
        assert_eq!(display(Decimal::ZERO), "Ksh 0.00");
    }
}
