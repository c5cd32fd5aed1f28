//! Lenient numeric coercion for project-input documents.
//!
//! Estimate documents are assembled from free-text form fields, so numeric
//! values may arrive as JSON numbers, numeric strings, partially numeric
//! strings, empty strings or `null`. The estimator follows a permissive
//! policy: anything that does not start with a number coerces to zero, and
//! a leading number is kept the way a form parser would keep it
//! (`"12.5 m"` reads as `12.5`).
//!
//! Arrays and objects in a scalar position are still rejected, since they
//! indicate a structurally wrong document rather than a sloppy field.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses the leading decimal number of `raw`, returning zero when there is none.
///
/// Leading whitespace is skipped; an optional sign, integer digits, fraction
/// digits and an exponent are accepted. Anything after the numeric prefix is
/// ignored.
///
/// # Examples
///
/// ```
/// use asphalt_estimator::models::parse_number_prefix;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(parse_number_prefix("12.5 m2"), Decimal::from_str("12.5").unwrap());
/// assert_eq!(parse_number_prefix("  -3"), Decimal::from(-3));
/// assert_eq!(parse_number_prefix("abc"), Decimal::ZERO);
/// assert_eq!(parse_number_prefix(""), Decimal::ZERO);
/// ```
pub fn parse_number_prefix(raw: &str) -> Decimal {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut cursor = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            cursor = 1;
            true
        }
        Some(b'+') => {
            cursor = 1;
            false
        }
        _ => false,
    };

    let int_start = cursor;
    while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
        cursor += 1;
    }
    let int_digits = &text[int_start..cursor];

    let mut frac_digits = "";
    if cursor < bytes.len() && bytes[cursor] == b'.' {
        let frac_start = cursor + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            frac_digits = &text[frac_start..frac_end];
            cursor = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return Decimal::ZERO;
    }

    let mut exponent = "";
    if cursor < bytes.len() && matches!(bytes[cursor], b'e' | b'E') {
        let mut exp_end = cursor + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            exponent = &text[cursor + 1..exp_end];
        }
    }

    let mut literal = String::with_capacity(cursor + 2);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        literal.push('.');
        literal.push_str(frac_digits);
    }

    let parsed = if exponent.is_empty() {
        Decimal::from_str(&literal)
    } else {
        literal.push('e');
        literal.push_str(exponent);
        Decimal::from_scientific(&literal)
    };

    parsed.unwrap_or(Decimal::ZERO)
}

/// Coerces a scalar JSON value to a decimal under the permissive policy.
///
/// Numbers keep their value, strings are parsed with [`parse_number_prefix`],
/// and everything else (booleans, `null`) becomes zero.
pub fn coerce_decimal(value: &Value) -> Decimal {
    match value {
        Value::Number(number) => parse_number_prefix(&number.to_string()),
        Value::String(text) => parse_number_prefix(text),
        _ => Decimal::ZERO,
    }
}

fn reject_structure<E: de::Error>(value: &Value, expected: &str) -> Option<E> {
    match value {
        Value::Array(_) => Some(E::invalid_type(Unexpected::Seq, &expected)),
        Value::Object(_) => Some(E::invalid_type(Unexpected::Map, &expected)),
        _ => None,
    }
}

/// Deserializes a numeric field, coercing non-numeric scalars to zero.
///
/// `null` also reads as zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

/// Deserializes an optional numeric field.
///
/// `null` and blank strings read as `None` (not supplied); other scalars are
/// coerced as in [`lenient_decimal`].
pub fn lenient_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(error) = reject_structure::<D::Error>(&value, "a number or numeric string") {
        return Err(error);
    }
    Ok(match &value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        other => Some(coerce_decimal(other)),
    })
}

/// Deserializes a whole-number count (days, for instance).
///
/// Fractions are truncated and negative or non-numeric values read as zero.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use rust_decimal::prelude::ToPrimitive;

    let value = lenient_decimal(deserializer)?;
    Ok(value.trunc().to_u32().unwrap_or(0))
}

/// Deserializes a flag from booleans, checkbox-style strings or numbers.
///
/// `true`, `"true"`, `"yes"`, `"on"`, `"1"` and non-zero numbers read as
/// `true`; everything else, including `null`, reads as `false`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(error) = reject_structure::<D::Error>(&value, "a boolean") {
        return Err(error);
    }
    Ok(match &value {
        Value::Bool(flag) => *flag,
        Value::Number(_) => !coerce_decimal(&value).is_zero(),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1"
        ),
        _ => false,
    })
}

/// Deserializes an optional identifier that may arrive as a string or a number.
///
/// Blank strings and `null` read as `None`.
pub fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if let Some(error) = reject_structure::<D::Error>(&value, "a string") {
        return Err(error);
    }
    Ok(match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// Keeps a supplied value only when it is strictly positive.
///
/// Form documents send `0` for untouched inputs, so a zero volume or density
/// means "not supplied" and the caller falls back to a derived or table value.
pub(crate) fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}
