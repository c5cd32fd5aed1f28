//! Imported material costing.
//!
//! Each import line is resolved to a weight and priced per tonne. Lines with
//! no usable quantity are excluded and reported as validation issues; the
//! remaining lines still compute.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, ImportMaterial, ImportMaterialCost, ValidationIssue, ValidationKind,
};

use super::arithmetic::{product, sum};
use super::quantity::calculate_item_quantity;

/// Input section name used in validation issues.
pub const IMPORT_MATERIALS_SECTION: &str = "importMaterials";

/// The result of costing imported materials.
#[derive(Debug, Clone)]
pub struct ImportMaterialsResult {
    /// Costed lines in input order.
    pub items: Vec<ImportMaterialCost>,
    /// Sum of line costs.
    pub total: Decimal,
    /// Lines excluded for missing quantities.
    pub issues: Vec<ValidationIssue>,
    /// Unknown-material warnings.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Costs each imported material line as `weight × costPerTonne`.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a line's weight or
/// cost, or the total, leaves the decimal range.
pub fn calculate_import_materials(
    materials: &[ImportMaterial],
    step_number: u32,
) -> EngineResult<ImportMaterialsResult> {
    let mut items = Vec::new();
    let mut issues = Vec::new();
    let mut warnings = Vec::new();
    let mut total = Decimal::ZERO;

    for (index, material) in materials.iter().enumerate() {
        let resolved = calculate_item_quantity(
            &material.material,
            material.area,
            material.depth,
            material.volume,
            material.density,
            material.compaction_percent,
        )?;
        warnings.extend(resolved.warning);

        let Some(quantity) = resolved.quantity else {
            issues.push(missing_quantity_issue(index, &material.material));
            continue;
        };

        let cost = product("import material cost", &[quantity.weight, material.cost_per_tonne])?;
        total = sum("import material total", [total, cost])?;
        items.push(ImportMaterialCost {
            index,
            material: material.material.clone(),
            quantity,
            cost_per_tonne: material.cost_per_tonne,
            machine_hours: material.machine_hours,
            tip_fee: material.tip_fee,
            cost,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "import_materials".to_string(),
        rule_name: "Imported Material Supply".to_string(),
        input: serde_json::json!({
            "line_count": materials.len()
        }),
        output: serde_json::json!({
            "costed_lines": items.iter().map(|item| serde_json::json!({
                "index": item.index,
                "material": item.material,
                "weight": item.quantity.weight.normalize().to_string(),
                "cost": item.cost.normalize().to_string()
            })).collect::<Vec<_>>(),
            "excluded_lines": issues.iter().map(|issue| issue.index).collect::<Vec<_>>(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Imported materials: {} of {} line(s) costed = ${}",
            items.len(),
            materials.len(),
            total.normalize()
        ),
    };

    Ok(ImportMaterialsResult {
        items,
        total,
        issues,
        warnings,
        audit_step,
    })
}

fn missing_quantity_issue(index: usize, material: &str) -> ValidationIssue {
    ValidationIssue {
        kind: ValidationKind::MissingRequiredQuantity,
        section: IMPORT_MATERIALS_SECTION.to_string(),
        index,
        item: material.to_string(),
        message: format!(
            "Import material {} ({}) has neither area and depth nor a volume; excluded from totals",
            index + 1,
            if material.is_empty() { "unnamed" } else { material }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn road_base(area: &str, depth: &str, cost_per_tonne: &str) -> ImportMaterial {
        ImportMaterial {
            material: "Road Base".to_string(),
            area: dec(area),
            depth: dec(depth),
            cost_per_tonne: dec(cost_per_tonne),
            ..ImportMaterial::default()
        }
    }

    #[test]
    fn test_imp_001_weight_times_price() {
        // 10 m² × 100 mm = 1 m³ × 1.2 × 2.2 t/m³ = 2.64 t × $40
        let result = calculate_import_materials(&[road_base("10", "100", "40")], 1).unwrap();
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].quantity.weight, dec("2.64"));
        assert_eq!(result.items[0].cost, dec("105.6"));
        assert_eq!(result.total, dec("105.6"));
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_imp_002_missing_quantity_excluded_siblings_compute() {
        let lines = vec![
            road_base("10", "100", "40"),
            ImportMaterial {
                material: "Sand".to_string(),
                cost_per_tonne: dec("30"),
                ..ImportMaterial::default()
            },
            road_base("20", "100", "40"),
        ];
        let result = calculate_import_materials(&lines, 1).unwrap();

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].index, 0);
        assert_eq!(result.items[1].index, 2);
        assert_eq!(result.total, dec("316.8"));

        assert_eq!(result.issues.len(), 1);
        let issue = &result.issues[0];
        assert_eq!(issue.kind, ValidationKind::MissingRequiredQuantity);
        assert_eq!(issue.section, "importMaterials");
        assert_eq!(issue.index, 1);
        assert_eq!(issue.item, "Sand");
    }

    #[test]
    fn test_imp_003_machine_hours_and_tip_fee_carried_not_costed() {
        let line = ImportMaterial {
            machine_hours: dec("5"),
            tip_fee: dec("99"),
            ..road_base("10", "100", "40")
        };
        let result = calculate_import_materials(&[line], 1).unwrap();
        assert_eq!(result.items[0].machine_hours, dec("5"));
        assert_eq!(result.items[0].tip_fee, dec("99"));
        assert_eq!(result.total, dec("105.6"));
    }

    #[test]
    fn test_imp_004_unknown_material_warns() {
        let line = ImportMaterial {
            material: "Recycled Glass".to_string(),
            volume: Some(dec("2")),
            cost_per_tonne: dec("10"),
            ..ImportMaterial::default()
        };
        let result = calculate_import_materials(&[line], 1).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "UNKNOWN_MATERIAL");
        // 2 m³ × 1.8 t/m³ × $10
        assert_eq!(result.total, dec("36"));
    }

    #[test]
    fn test_imp_005_empty_list() {
        let result = calculate_import_materials(&[], 3).unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.audit_step.step_number, 3);
    }

    #[test]
    fn test_imp_006_overflowing_price_is_an_error() {
        let line = road_base("10", "100", "79000000000000000000000000000");
        let result = calculate_import_materials(&[line], 1);
        assert!(matches!(
            result,
            Err(EngineError::Overflow { quantity }) if quantity == "import material cost"
        ));
    }
}
