//! Additional labor (subcontractor) costing.

use rust_decimal::Decimal;

use crate::config::PricingRates;
use crate::error::EngineResult;
use crate::models::{AuditStep, OtherLaborCost, OtherLaborItem, OtherLaborLine, PricingMethod};

use super::arithmetic::{product, sum};

/// The result of costing additional labor items.
#[derive(Debug, Clone)]
pub struct OtherLaborResult {
    /// Priced items and total.
    pub cost: OtherLaborCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices additional labor items.
///
/// Hourly items cost `hours × costPerHour`, fixed items cost `fixedAmount`;
/// missing values read as zero. Items flagged `addGst` have the
/// subcontractor GST added on top.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when an item cost or the
/// total leaves the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::calculate_other_labor;
/// use asphalt_estimator::config::EstimatorConfig;
/// use asphalt_estimator::models::{OtherLaborItem, PricingMethod};
/// use rust_decimal::Decimal;
///
/// let item = OtherLaborItem {
///     labor_type: "Line marking".to_string(),
///     pricing_method: PricingMethod::Fixed,
///     fixed_amount: Some(Decimal::from(500)),
///     add_gst: true,
///     ..OtherLaborItem::default()
/// };
/// let config = EstimatorConfig::standard();
/// let result = calculate_other_labor(&[item], config.pricing(), 1).unwrap();
/// assert_eq!(result.cost.total, Decimal::from(550));
/// ```
pub fn calculate_other_labor(
    items: &[OtherLaborItem],
    pricing: &PricingRates,
    step_number: u32,
) -> EngineResult<OtherLaborResult> {
    let gst_rate = pricing.subcontractor_gst_pct / Decimal::ONE_HUNDRED;

    let lines = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let amount = match item.pricing_method {
                PricingMethod::Hourly => product(
                    "additional labor cost",
                    &[
                        item.hours.unwrap_or(Decimal::ZERO),
                        item.cost_per_hour.unwrap_or(Decimal::ZERO),
                    ],
                )?,
                PricingMethod::Fixed => item.fixed_amount.unwrap_or(Decimal::ZERO),
            };
            let gst = if item.add_gst {
                product("subcontractor GST", &[amount, gst_rate])?
            } else {
                Decimal::ZERO
            };
            Ok(OtherLaborLine {
                index,
                labor_type: item.labor_type.clone(),
                pricing_method: item.pricing_method,
                amount,
                gst,
                cost: sum("additional labor cost", [amount, gst])?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total = sum("additional labor total", lines.iter().map(|line| line.cost))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "other_labor".to_string(),
        rule_name: "Additional Labor".to_string(),
        input: serde_json::json!({
            "item_count": items.len(),
            "subcontractor_gst_pct": pricing.subcontractor_gst_pct.normalize().to_string()
        }),
        output: serde_json::json!({
            "lines": lines.iter().map(|line| serde_json::json!({
                "type": line.labor_type,
                "amount": line.amount.normalize().to_string(),
                "gst": line.gst.normalize().to_string()
            })).collect::<Vec<_>>(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Additional labor: {} item(s) = ${}",
            lines.len(),
            total.normalize()
        ),
    };

    Ok(OtherLaborResult {
        cost: OtherLaborCost { lines, total },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstimatorConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn pricing() -> PricingRates {
        EstimatorConfig::standard().pricing().clone()
    }

    #[test]
    fn test_oth_001_hourly_item() {
        let item = OtherLaborItem {
            labor_type: "Supervisor".to_string(),
            hours: Some(dec("4")),
            cost_per_hour: Some(dec("55.5")),
            ..OtherLaborItem::default()
        };
        let result = calculate_other_labor(&[item], &pricing(), 1).unwrap();
        assert_eq!(result.cost.lines[0].amount, dec("222"));
        assert_eq!(result.cost.lines[0].gst, Decimal::ZERO);
        assert_eq!(result.cost.total, dec("222"));
    }

    #[test]
    fn test_oth_002_hourly_with_gst() {
        let item = OtherLaborItem {
            hours: Some(dec("10")),
            cost_per_hour: Some(dec("80")),
            add_gst: true,
            ..OtherLaborItem::default()
        };
        let result = calculate_other_labor(&[item], &pricing(), 1).unwrap();
        assert_eq!(result.cost.lines[0].gst, dec("80"));
        assert_eq!(result.cost.total, dec("880"));
    }

    #[test]
    fn test_oth_003_missing_values_are_zero() {
        let items = vec![
            OtherLaborItem {
                hours: Some(dec("3")),
                ..OtherLaborItem::default()
            },
            OtherLaborItem {
                pricing_method: PricingMethod::Fixed,
                ..OtherLaborItem::default()
            },
        ];
        let result = calculate_other_labor(&items, &pricing(), 1).unwrap();
        assert_eq!(result.cost.total, Decimal::ZERO);
        assert_eq!(result.cost.lines.len(), 2);
    }

    #[test]
    fn test_oth_004_fixed_ignores_hours() {
        let item = OtherLaborItem {
            pricing_method: PricingMethod::Fixed,
            hours: Some(dec("10")),
            cost_per_hour: Some(dec("100")),
            fixed_amount: Some(dec("300")),
            ..OtherLaborItem::default()
        };
        let result = calculate_other_labor(&[item], &pricing(), 1).unwrap();
        assert_eq!(result.cost.total, dec("300"));
    }
}
