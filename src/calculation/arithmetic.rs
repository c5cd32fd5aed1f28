//! Overflow-checked decimal arithmetic.
//!
//! `rust_decimal` operators panic when a result leaves the 96-bit range.
//! Numeric inputs are coerced from free-text fields without a magnitude
//! check, so the section calculators multiply, add and subtract through
//! these helpers and report [`EngineError::Overflow`] instead.
//!
//! Division by a constant of at least one (`/ 100`, `/ 1000`) cannot
//! overflow and stays a plain operator.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// Multiplies `factors` together.
///
/// `quantity` names the value being computed, for the error message.
pub(crate) fn product(quantity: &str, factors: &[Decimal]) -> EngineResult<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, factor| acc.checked_mul(*factor))
        .ok_or_else(|| overflow(quantity))
}

/// Adds `terms` together.
pub(crate) fn sum<I>(quantity: &str, terms: I) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    terms
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, term| acc.checked_add(term))
        .ok_or_else(|| overflow(quantity))
}

/// Subtracts `rhs` from `lhs`.
pub(crate) fn difference(quantity: &str, lhs: Decimal, rhs: Decimal) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs).ok_or_else(|| overflow(quantity))
}

/// The error for a value that left the decimal range.
pub(crate) fn overflow(quantity: &str) -> EngineError {
    EngineError::Overflow {
        quantity: quantity.to_string(),
    }
}
