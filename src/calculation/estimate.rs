//! Full project estimate.
//!
//! Runs every section calculator in a fixed order, numbering audit steps
//! sequentially, then prices the total through the quote pipeline.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EstimatorConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditTrace, CostResult, MaterialCosts, ProjectInput};

use super::arithmetic::sum;
use super::consumables::calculate_consumables;
use super::depreciation::calculate_depreciation;
use super::emulsion::calculate_emulsion;
use super::excavation::calculate_excavation;
use super::import_materials::calculate_import_materials;
use super::labor::calculate_labor;
use super::other_labor::calculate_other_labor;
use super::quantity::calculate_asphalt;
use super::quote::calculate_quote;
use super::traffic_control::calculate_traffic_control;

/// Estimates the cost and quoted price of a paving job.
///
/// Lines without a usable quantity are excluded and reported in
/// `validation_issues`; unknown materials, machines and traffic items are
/// reported as audit warnings. Neither stops the estimate.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidMargin`] when the profit
/// margin is 100% or more, and [`crate::error::EngineError::Overflow`] when
/// input magnitudes push a cost or price out of the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::estimate;
/// use asphalt_estimator::config::EstimatorConfig;
/// use asphalt_estimator::models::{AsphaltLayer, ProjectInput};
/// use rust_decimal::Decimal;
///
/// let input = ProjectInput {
///     asphalt: AsphaltLayer {
///         area: Decimal::from(100),
///         depth: Decimal::from(50),
///         density: Decimal::from(2400),
///         cost_per_tonne: Decimal::from(200),
///     },
///     ..ProjectInput::default()
/// };
/// let result = estimate(&input, &EstimatorConfig::standard()).unwrap();
/// // 15 t at $200
/// assert_eq!(result.total_costs, Decimal::from(3000));
/// ```
pub fn estimate(input: &ProjectInput, config: &EstimatorConfig) -> EngineResult<CostResult> {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings = Vec::new();
    let mut validation_issues = Vec::new();
    let mut step_number: u32 = 1;

    let total_area = input.total_area();

    let asphalt = calculate_asphalt(&input.asphalt, step_number)?;
    steps.push(asphalt.audit_step);
    step_number += 1;

    let emulsion = calculate_emulsion(&input.emulsion, total_area, config.pricing(), step_number)?;
    steps.push(emulsion.audit_step);
    step_number += 1;

    let imports = calculate_import_materials(&input.import_materials, step_number)?;
    steps.push(imports.audit_step);
    warnings.extend(imports.warnings);
    validation_issues.extend(imports.issues);
    step_number += 1;

    let excavation = calculate_excavation(
        &input.excavation_items,
        &input.excavation_equipment,
        imports.total,
        step_number,
    )?;
    steps.push(excavation.audit_step);
    warnings.extend(excavation.warnings);
    validation_issues.extend(excavation.issues);
    step_number += 1;

    let labor = calculate_labor(&input.labor, &input.oncosts, config.labor(), step_number)?;
    step_number += labor.audit_steps.len() as u32;
    steps.extend(labor.audit_steps);

    let other_labor =
        calculate_other_labor(&input.other_labor_items, config.pricing(), step_number)?;
    steps.push(other_labor.audit_step);
    step_number += 1;

    let depreciation = calculate_depreciation(
        &input.equipment_units,
        labor.labor_cost.total_hours,
        config.depreciation(),
        step_number,
    )?;
    steps.push(depreciation.audit_step);
    step_number += 1;

    let consumables = calculate_consumables(&input.consumables, step_number)?;
    steps.push(consumables.audit_step);
    step_number += 1;

    let traffic = calculate_traffic_control(
        &input.traffic_control,
        config.traffic_control(),
        step_number,
    )?;
    steps.push(traffic.audit_step);
    warnings.extend(traffic.warnings);
    step_number += 1;

    let total_costs = sum(
        "total costs",
        [
            labor.labor_cost.total_cost,
            other_labor.cost.total,
            asphalt.cost.cost,
            emulsion.cost.cost,
            depreciation.depreciation.total,
            consumables.cost.total,
            traffic.cost.total,
            excavation.costs.section_total,
        ],
    )?;

    debug!(
        asphalt = %asphalt.cost.cost,
        emulsion = %emulsion.cost.cost,
        excavation = %excavation.costs.section_total,
        labor = %labor.labor_cost.total_cost,
        other_labor = %other_labor.cost.total,
        depreciation = %depreciation.depreciation.total,
        consumables = %consumables.cost.total,
        traffic_control = %traffic.cost.total,
        total_costs = %total_costs,
        "Section totals"
    );

    let quote = calculate_quote(total_costs, total_area, &input.project, step_number)?;
    steps.push(quote.audit_step);

    Ok(CostResult {
        total_area,
        material_costs: MaterialCosts {
            asphalt: asphalt.cost,
            import: imports.items,
            emulsion: emulsion.cost,
        },
        excavation_costs: excavation.costs,
        labor_cost: labor.labor_cost,
        other_labor_cost: other_labor.cost,
        equipment_depreciation: depreciation.depreciation,
        consumables_cost: consumables.cost,
        traffic_control_cost: traffic.cost,
        total_costs,
        quote_before_discount: quote.quote_before_discount,
        discount_amount: quote.discount_amount,
        subtotal_after_discount: quote.subtotal_after_discount,
        gst_amount: quote.gst_amount,
        total_with_tax: quote.total_with_tax,
        profit: quote.profit,
        per_square_meter: quote.per_square_meter,
        valid_until: quote.valid_until,
        validation_issues,
        audit_trace: AuditTrace { steps, warnings },
    })
}

/// Sums the section totals a [`CostResult`] reports.
///
/// Equal to `total_costs` for any result produced by [`estimate`], which
/// has already checked that this sum fits; `None` only for a result built
/// by hand whose sections overflow.
pub fn sum_sections(result: &CostResult) -> Option<Decimal> {
    sum(
        "total costs",
        [
            result.labor_cost.total_cost,
            result.other_labor_cost.total,
            result.material_costs.asphalt.cost,
            result.material_costs.emulsion.cost,
            result.equipment_depreciation.total,
            result.consumables_cost.total,
            result.traffic_control_cost.total,
            result.excavation_costs.section_total,
        ],
    )
    .ok()
}
