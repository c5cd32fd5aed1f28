//! Excavation and disposal costing.
//!
//! Each excavation line contributes up to three costs:
//!
//! - machine time on its assigned machine (`machineHours × hourlyRate`),
//!   bucketed by machine type; third-party lines carry no machine cost
//! - disposal (`weight × tipFee`), bucketed by disposal route; always zero
//!   when the spoil is reused on site
//! - a flat third-party charge (`costPerTonne`, not scaled by quantity)
//!
//! The section total adds the imported material supply total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, AuditWarning, DisposalType, ExcavationCosts, ExcavationEquipment, ExcavationItem,
    ExcavationItemCost, ValidationIssue, ValidationKind,
};

use super::arithmetic::{product, sum};
use super::quantity::calculate_item_quantity;

/// Input section name used in validation issues.
pub const EXCAVATION_ITEMS_SECTION: &str = "excavationItems";

/// Warning code raised when an item references a machine not in the pool.
pub const UNKNOWN_EQUIPMENT_WARNING: &str = "UNKNOWN_EQUIPMENT";

/// The result of an excavation calculation.
#[derive(Debug, Clone)]
pub struct ExcavationResult {
    /// Per-item costs, buckets and section totals.
    pub costs: ExcavationCosts,
    /// Lines excluded for missing quantities.
    pub issues: Vec<ValidationIssue>,
    /// Unknown material and equipment warnings.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the disposal route a line is costed against.
///
/// Clean fill flagged as dirty goes to the dirty fill route.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::disposal_route;
/// use asphalt_estimator::models::DisposalType;
///
/// assert_eq!(disposal_route(&DisposalType::CleanFill, true), DisposalType::DirtyFill);
/// assert_eq!(disposal_route(&DisposalType::Reuse, true), DisposalType::Reuse);
/// ```
pub fn disposal_route(disposal: &DisposalType, is_dirty: bool) -> DisposalType {
    match disposal {
        DisposalType::CleanFill if is_dirty => DisposalType::DirtyFill,
        other => other.clone(),
    }
}

/// Costs excavation lines and totals the excavation section.
///
/// The tip fee is the line's own; a missing fee reads as zero and the line
/// carries no disposal cost.
///
/// # Arguments
///
/// * `items` - Excavation lines in input order
/// * `equipment` - Machines the lines may reference by id
/// * `import_material_total` - Imported material supply total, added to the section
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a line cost or a
/// total leaves the decimal range.
pub fn calculate_excavation(
    items: &[ExcavationItem],
    equipment: &[ExcavationEquipment],
    import_material_total: Decimal,
    step_number: u32,
) -> EngineResult<ExcavationResult> {
    let mut costs = ExcavationCosts {
        import_material_total,
        ..ExcavationCosts::default()
    };
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let resolved = calculate_item_quantity(
            &item.material,
            item.area,
            item.depth,
            item.volume,
            item.density,
            item.compaction_percent,
        )?;
        warnings.extend(resolved.warning);

        let Some(quantity) = resolved.quantity else {
            issues.push(missing_quantity_issue(index, item));
            continue;
        };

        let route = disposal_route(&item.disposal, item.is_dirty);
        let disposal_cost = match route {
            DisposalType::Reuse => Decimal::ZERO,
            _ => product("disposal cost", &[quantity.weight, item.tip_fee])?,
        };

        let (equipment_type, machine_cost) = if item.is_third_party {
            (None, Decimal::ZERO)
        } else {
            match item.equipment_id.as_deref() {
                None => (None, Decimal::ZERO),
                Some(id) => match find_equipment(equipment, id) {
                    Some(machine) => (
                        Some(machine.equipment_type.clone()),
                        product("machine cost", &[item.machine_hours, machine.hourly_rate])?,
                    ),
                    None => {
                        warnings.push(unknown_equipment(index, id));
                        (None, Decimal::ZERO)
                    }
                },
            }
        };

        let third_party_cost = if item.is_third_party {
            item.cost_per_tonne
        } else {
            Decimal::ZERO
        };

        if let Some(equipment_type) = &equipment_type {
            let bucket = costs
                .equipment_totals
                .entry(equipment_type.clone())
                .or_insert(Decimal::ZERO);
            *bucket = sum("machine total", [*bucket, machine_cost])?;
        }
        if route != DisposalType::Reuse {
            let bucket = costs
                .disposal_totals
                .entry(route.name().to_string())
                .or_insert(Decimal::ZERO);
            *bucket = sum("disposal total", [*bucket, disposal_cost])?;
        }
        costs.machine_total = sum("machine total", [costs.machine_total, machine_cost])?;
        costs.disposal_total = sum("disposal total", [costs.disposal_total, disposal_cost])?;
        costs.third_party_total =
            sum("third party total", [costs.third_party_total, third_party_cost])?;
        let total = sum("excavation line cost", [machine_cost, disposal_cost, third_party_cost])?;

        costs.per_item.push(ExcavationItemCost {
            index,
            description: item.description.clone(),
            material: item.material.clone(),
            quantity,
            disposal: route.name().to_string(),
            tip_fee: item.tip_fee,
            equipment_type,
            machine_cost,
            disposal_cost,
            third_party_cost,
            total,
        });
    }

    costs.section_total = sum(
        "excavation section total",
        [
            costs.machine_total,
            costs.disposal_total,
            costs.third_party_total,
            costs.import_material_total,
        ],
    )?;

    let audit_step = section_audit_step(&costs, items.len(), &issues, step_number);

    Ok(ExcavationResult {
        costs,
        issues,
        warnings,
        audit_step,
    })
}

fn find_equipment<'a>(
    equipment: &'a [ExcavationEquipment],
    id: &str,
) -> Option<&'a ExcavationEquipment> {
    equipment
        .iter()
        .find(|machine| machine.id.as_deref() == Some(id))
}

fn unknown_equipment(index: usize, id: &str) -> AuditWarning {
    warn!(item = index, equipment_id = %id, "Excavation item references unknown equipment");
    AuditWarning {
        code: UNKNOWN_EQUIPMENT_WARNING.to_string(),
        message: format!(
            "Excavation item {} references unknown equipment '{}'; no machine cost charged",
            index + 1,
            id
        ),
        severity: "medium".to_string(),
    }
}

fn missing_quantity_issue(index: usize, item: &ExcavationItem) -> ValidationIssue {
    let label = if item.description.trim().is_empty() {
        item.material.clone()
    } else {
        item.description.clone()
    };
    ValidationIssue {
        kind: ValidationKind::MissingRequiredQuantity,
        section: EXCAVATION_ITEMS_SECTION.to_string(),
        index,
        message: format!(
            "Excavation item {} ({}) has neither area and depth nor a volume; excluded from totals",
            index + 1,
            if label.is_empty() { "unnamed" } else { label.as_str() }
        ),
        item: label,
    }
}

fn section_audit_step(
    costs: &ExcavationCosts,
    line_count: usize,
    issues: &[ValidationIssue],
    step_number: u32,
) -> AuditStep {
    let buckets = |totals: &BTreeMap<String, Decimal>| {
        totals
            .iter()
            .map(|(name, total)| (name.clone(), serde_json::json!(total.normalize().to_string())))
            .collect::<serde_json::Map<_, _>>()
    };

    AuditStep {
        step_number,
        rule_id: "excavation_disposal".to_string(),
        rule_name: "Excavation and Disposal".to_string(),
        input: serde_json::json!({
            "line_count": line_count,
            "import_material_total": costs.import_material_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "equipment_totals": buckets(&costs.equipment_totals),
            "disposal_totals": buckets(&costs.disposal_totals),
            "machine_total": costs.machine_total.normalize().to_string(),
            "disposal_total": costs.disposal_total.normalize().to_string(),
            "third_party_total": costs.third_party_total.normalize().to_string(),
            "excluded_lines": issues.iter().map(|issue| issue.index).collect::<Vec<_>>(),
            "section_total": costs.section_total.normalize().to_string()
        }),
        reasoning: format!(
            "Excavation: ${} machine + ${} disposal + ${} third party + ${} imports = ${}",
            costs.machine_total.normalize(),
            costs.disposal_total.normalize(),
            costs.third_party_total.normalize(),
            costs.import_material_total.normalize(),
            costs.section_total.normalize()
        ),
    }
}
