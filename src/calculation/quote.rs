//! Quote pipeline: margin, discount, GST and per-m² metrics.
//!
//! ```text
//! quote      = totalCosts / (1 − margin / 100)
//! discount   = quote × discount / 100
//! subtotal   = quote − discount
//! gst        = subtotal × tax / 100
//! total      = subtotal + gst
//! profit     = subtotal − totalCosts
//! ```
//!
//! The margin is a share of the quoted price, not a markup on cost, so a
//! margin of 100% or more has no finite quote and is rejected.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PerSquareMeter, ProjectSettings};

use super::arithmetic::{difference, overflow, product, sum};

/// The quoted price derived from total costs.
#[derive(Debug, Clone)]
pub struct QuoteResult {
    /// Price after margin, before discount.
    pub quote_before_discount: Decimal,
    /// Discount taken off the quote.
    pub discount_amount: Decimal,
    /// Quote less discount.
    pub subtotal_after_discount: Decimal,
    /// GST on the discounted subtotal.
    pub gst_amount: Decimal,
    /// Price the client pays.
    pub total_with_tax: Decimal,
    /// Discounted subtotal less total costs.
    pub profit: Decimal,
    /// Per-m² metrics; absent when the area is not positive.
    pub per_square_meter: PerSquareMeter,
    /// Last day the quote is valid.
    pub valid_until: Option<NaiveDate>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices a job from its total costs.
///
/// # Errors
///
/// Returns [`EngineError::InvalidMargin`] when the margin is 100% or more,
/// and [`EngineError::Overflow`] when a price leaves the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::calculate_quote;
/// use asphalt_estimator::models::ProjectSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = ProjectSettings {
///     profit_margin_pct: Decimal::from(20),
///     discount_pct: Decimal::from(10),
///     tax_rate_pct: Decimal::from(10),
///     ..ProjectSettings::default()
/// };
/// let quote = calculate_quote(Decimal::from(1000), Decimal::from(100), &settings, 1).unwrap();
/// assert_eq!(quote.quote_before_discount, Decimal::from(1250));
/// assert_eq!(quote.total_with_tax, Decimal::from_str("1237.5").unwrap());
/// ```
pub fn calculate_quote(
    total_costs: Decimal,
    total_area: Decimal,
    settings: &ProjectSettings,
    step_number: u32,
) -> EngineResult<QuoteResult> {
    let margin_pct = settings.profit_margin_pct;
    if margin_pct >= Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidMargin { margin_pct });
    }

    let retained = Decimal::ONE - margin_pct / Decimal::ONE_HUNDRED;
    let quote_before_discount = total_costs
        .checked_div(retained)
        .ok_or_else(|| overflow("quote before discount"))?;

    let discount_rate = settings.discount_pct / Decimal::ONE_HUNDRED;
    let discount_amount = product("discount", &[quote_before_discount, discount_rate])?;
    let subtotal_after_discount =
        difference("discounted subtotal", quote_before_discount, discount_amount)?;
    let tax_rate = settings.tax_rate_pct / Decimal::ONE_HUNDRED;
    let gst_amount = product("GST", &[subtotal_after_discount, tax_rate])?;
    let total_with_tax = sum("total with tax", [subtotal_after_discount, gst_amount])?;
    let profit = difference("profit", subtotal_after_discount, total_costs)?;

    let per_square_meter = if total_area > Decimal::ZERO {
        PerSquareMeter {
            cost: total_costs.checked_div(total_area),
            quote: total_with_tax.checked_div(total_area),
            profit: profit.checked_div(total_area),
        }
    } else {
        PerSquareMeter::default()
    };

    let valid_until = settings.issue_date.and_then(|issued| {
        issued.checked_add_days(Days::new(u64::from(settings.valid_for_days)))
    });

    let audit_step = AuditStep {
        step_number,
        rule_id: "quote_pipeline".to_string(),
        rule_name: "Quote Pipeline".to_string(),
        input: serde_json::json!({
            "total_costs": total_costs.normalize().to_string(),
            "profit_margin_pct": margin_pct.normalize().to_string(),
            "discount_pct": settings.discount_pct.normalize().to_string(),
            "tax_rate_pct": settings.tax_rate_pct.normalize().to_string(),
            "total_area": total_area.normalize().to_string()
        }),
        output: serde_json::json!({
            "quote_before_discount": quote_before_discount.normalize().to_string(),
            "discount_amount": discount_amount.normalize().to_string(),
            "subtotal_after_discount": subtotal_after_discount.normalize().to_string(),
            "gst_amount": gst_amount.normalize().to_string(),
            "total_with_tax": total_with_tax.normalize().to_string(),
            "profit": profit.normalize().to_string(),
            "valid_until": valid_until.map(|date| date.to_string())
        }),
        reasoning: format!(
            "${} at {}% margin = ${}; less {}% discount = ${}; plus {}% GST = ${}",
            total_costs.normalize(),
            margin_pct.normalize(),
            quote_before_discount.normalize(),
            settings.discount_pct.normalize(),
            subtotal_after_discount.normalize(),
            settings.tax_rate_pct.normalize(),
            total_with_tax.normalize()
        ),
    };

    Ok(QuoteResult {
        quote_before_discount,
        discount_amount,
        subtotal_after_discount,
        gst_amount,
        total_with_tax,
        profit,
        per_square_meter,
        valid_until,
        audit_step,
    })
}
