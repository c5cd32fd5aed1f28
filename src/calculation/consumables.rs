//! Consumables costing.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, Consumable, Consumables, ConsumablesCost};

use super::arithmetic::{product, sum};

/// The result of a consumables calculation.
#[derive(Debug, Clone)]
pub struct ConsumablesResult {
    /// Cost per consumable and total.
    pub cost: ConsumablesCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Sums `quantity × unitCost` over paint, petrol, diesel and gas.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a line or the total
/// leaves the decimal range.
pub fn calculate_consumables(
    consumables: &Consumables,
    step_number: u32,
) -> EngineResult<ConsumablesResult> {
    let line = |consumable: &Consumable| {
        product("consumables cost", &[consumable.quantity, consumable.unit_cost])
    };

    let paint = line(&consumables.paint)?;
    let petrol = line(&consumables.petrol)?;
    let diesel = line(&consumables.diesel)?;
    let gas = line(&consumables.gas)?;
    let total = sum("consumables total", [paint, petrol, diesel, gas])?;
    let pair = |consumable: &Consumable| {
        [
            consumable.quantity.normalize().to_string(),
            consumable.unit_cost.normalize().to_string(),
        ]
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "consumables".to_string(),
        rule_name: "Consumables".to_string(),
        input: serde_json::json!({
            "paint": pair(&consumables.paint),
            "petrol": pair(&consumables.petrol),
            "diesel": pair(&consumables.diesel),
            "gas": pair(&consumables.gas)
        }),
        output: serde_json::json!({
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Consumables: paint ${} + petrol ${} + diesel ${} + gas ${} = ${}",
            paint.normalize(),
            petrol.normalize(),
            diesel.normalize(),
            gas.normalize(),
            total.normalize()
        ),
    };

    Ok(ConsumablesResult {
        cost: ConsumablesCost {
            paint,
            petrol,
            diesel,
            gas,
            total,
        },
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn consumable(quantity: &str, unit_cost: &str) -> Consumable {
        Consumable {
            quantity: dec(quantity),
            unit_cost: dec(unit_cost),
        }
    }

    #[test]
    fn test_con_001_sum_of_products() {
        let consumables = Consumables {
            paint: consumable("2", "45"),
            petrol: consumable("20", "1.95"),
            diesel: consumable("100", "2.1"),
            gas: consumable("1", "35"),
        };
        let result = calculate_consumables(&consumables, 1).unwrap();
        assert_eq!(result.cost.paint, dec("90"));
        assert_eq!(result.cost.petrol, dec("39"));
        assert_eq!(result.cost.diesel, dec("210"));
        assert_eq!(result.cost.gas, dec("35"));
        assert_eq!(result.cost.total, dec("374"));
    }

    #[test]
    fn test_con_002_missing_inputs_are_zero() {
        let consumables = Consumables {
            diesel: consumable("50", "2"),
            ..Consumables::default()
        };
        let result = calculate_consumables(&consumables, 1).unwrap();
        assert_eq!(result.cost.paint, Decimal::ZERO);
        assert_eq!(result.cost.total, dec("100"));
    }
}
