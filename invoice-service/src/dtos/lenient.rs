//! Deserializers that accept what a browser form tends to send: numbers as
//! strings, empty strings for "unset", and dates with or without a time.

use crate::models::{coerce_amount, coerce_quantity, parse_date};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

fn number_to_decimal(n: &serde_json::Number) -> Decimal {
    Decimal::from_str(&n.to_string())
        .or_else(|_| Decimal::from_scientific(&n.to_string()))
        .unwrap_or(Decimal::ZERO)
}

/// Amount; anything that is not a number coerces to zero.
pub fn amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => number_to_decimal(&n),
        Some(Value::String(s)) => coerce_amount(&s),
        _ => Decimal::ZERO,
    })
}

/// Optional amount; `null`, absent and `""` are `None`.
pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Some(number_to_decimal(&n)),
        Some(Value::String(s)) if !s.trim().is_empty() => Some(coerce_amount(&s)),
        _ => None,
    })
}

/// Quantity; fractions truncate and garbage coerces to zero.
pub fn quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n
            .as_i64()
            .unwrap_or_else(|| coerce_quantity(&n.to_string())),
        Some(Value::String(s)) => coerce_quantity(&s),
        _ => 0,
    })
}

/// Invoice number; zero and unparseable values count as absent.
pub fn invoice_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| *n != 0))
}

/// Calendar date; `null`, absent and `""` are `None`, other junk is an error.
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date: {}", s))),
    }
}
