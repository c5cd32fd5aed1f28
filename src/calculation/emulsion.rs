//! Tack coat (emulsion) costing.

use rust_decimal::Decimal;

use crate::config::PricingRates;
use crate::error::EngineResult;
use crate::models::{AuditStep, Emulsion, EmulsionCost};

use super::arithmetic::product;

/// The result of an emulsion calculation.
#[derive(Debug, Clone)]
pub struct EmulsionResult {
    /// Litres and cost.
    pub cost: EmulsionCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates tack coat litres over the asphalt area and their cost with wastage.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when the litres or the
/// cost leave the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::calculate_emulsion;
/// use asphalt_estimator::config::EstimatorConfig;
/// use asphalt_estimator::models::Emulsion;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let emulsion = Emulsion {
///     emulsion_type: "CRS-60".to_string(),
///     coverage_per_m2: Decimal::from_str("0.25").unwrap(),
///     cost_per_litre: Decimal::from(2),
/// };
/// let config = EstimatorConfig::standard();
/// let result = calculate_emulsion(&emulsion, Decimal::from(100), config.pricing(), 1).unwrap();
/// assert_eq!(result.cost.litres, Decimal::from(25));
/// assert_eq!(result.cost.cost, Decimal::from_str("52.5").unwrap());
/// ```
pub fn calculate_emulsion(
    emulsion: &Emulsion,
    area: Decimal,
    pricing: &PricingRates,
    step_number: u32,
) -> EngineResult<EmulsionResult> {
    let wastage_factor = pricing.emulsion_wastage_factor;
    let litres = product("emulsion litres", &[area, emulsion.coverage_per_m2])?;
    let cost = product("emulsion cost", &[litres, emulsion.cost_per_litre, wastage_factor])?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "emulsion".to_string(),
        rule_name: "Tack Coat Emulsion".to_string(),
        input: serde_json::json!({
            "type": emulsion.emulsion_type,
            "area": area.normalize().to_string(),
            "coverage_per_m2": emulsion.coverage_per_m2.normalize().to_string(),
            "cost_per_litre": emulsion.cost_per_litre.normalize().to_string()
        }),
        output: serde_json::json!({
            "litres": litres.normalize().to_string(),
            "wastage_factor": wastage_factor.normalize().to_string(),
            "cost": cost.normalize().to_string()
        }),
        reasoning: format!(
            "Emulsion: {} m² × {} L/m² = {} L × ${} × {} wastage = ${}",
            area.normalize(),
            emulsion.coverage_per_m2.normalize(),
            litres.normalize(),
            emulsion.cost_per_litre.normalize(),
            wastage_factor.normalize(),
            cost.normalize()
        ),
    };

    Ok(EmulsionResult {
        cost: EmulsionCost {
            litres,
            cost_per_litre: emulsion.cost_per_litre,
            wastage_factor,
            cost,
        },
        audit_step,
    })
}
