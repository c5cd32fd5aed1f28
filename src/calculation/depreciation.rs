//! Owned equipment depreciation.
//!
//! Straight-line depreciation per unit, spread over the working days of a
//! year and charged for the days the job runs:
//!
//! ```text
//! annual = units × (unitCost − residual) / usefulLife
//! daily  = annual / workingDaysPerYear
//! cost   = daily × totalJobDays,   totalJobDays = totalLaborHours / hoursPerJobDay
//! ```

use rust_decimal::Decimal;

use crate::config::DepreciationConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, DepreciationLine, EquipmentDepreciation, EquipmentKind, EquipmentUnits,
};

use super::arithmetic::{difference, product, sum};

/// The result of a depreciation calculation.
#[derive(Debug, Clone)]
pub struct DepreciationResult {
    /// Lines per equipment kind and total.
    pub depreciation: EquipmentDepreciation,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates depreciation for the owned equipment on the job.
///
/// Job days come from crew person-hours at a fixed hours-per-day, not from
/// the labor block's own day count. Kinds with no units are omitted; a zero
/// useful life or zero working days contributes nothing.
///
/// # Arguments
///
/// * `units` - Unit counts per equipment kind
/// * `total_labor_hours` - Crew person-hours from the labor calculation
/// * `config` - Depreciation schedules and day assumptions
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a unit count or the
/// job days push a cost out of the decimal range.
pub fn calculate_depreciation(
    units: &EquipmentUnits,
    total_labor_hours: Decimal,
    config: &DepreciationConfig,
    step_number: u32,
) -> EngineResult<DepreciationResult> {
    let total_job_days = total_labor_hours
        .checked_div(config.hours_per_job_day)
        .unwrap_or(Decimal::ZERO);

    let lines = EquipmentKind::ALL
        .into_iter()
        .filter(|kind| !units.count(*kind).is_zero())
        .map(|kind| {
            let count = units.count(kind);
            let annual = match config.schedule(kind) {
                Some(schedule) => {
                    let depreciable = difference(
                        "depreciable value",
                        schedule.unit_cost,
                        schedule.residual_value,
                    )?;
                    product("annual depreciation", &[count, depreciable])?
                        .checked_div(schedule.useful_life_years)
                        .unwrap_or(Decimal::ZERO)
                }
                None => Decimal::ZERO,
            };
            let daily = annual
                .checked_div(config.working_days_per_year)
                .unwrap_or(Decimal::ZERO);
            Ok(DepreciationLine {
                kind,
                units: count,
                annual,
                daily,
                cost: product("depreciation cost", &[daily, total_job_days])?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total = sum("depreciation total", lines.iter().map(|line| line.cost))?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "equipment_depreciation".to_string(),
        rule_name: "Equipment Depreciation".to_string(),
        input: serde_json::json!({
            "total_labor_hours": total_labor_hours.normalize().to_string(),
            "hours_per_job_day": config.hours_per_job_day.normalize().to_string(),
            "working_days_per_year": config.working_days_per_year.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_job_days": total_job_days.normalize().to_string(),
            "lines": lines.iter().map(|line| serde_json::json!({
                "kind": line.kind.to_string(),
                "units": line.units.normalize().to_string(),
                "daily": line.daily.round_dp(4).normalize().to_string(),
                "cost": line.cost.round_dp(2).normalize().to_string()
            })).collect::<Vec<_>>(),
            "total": total.round_dp(2).normalize().to_string()
        }),
        reasoning: format!(
            "Depreciation: {} kind(s) over {} job day(s) = ${}",
            lines.len(),
            total_job_days.normalize(),
            total.round_dp(2).normalize()
        ),
    };

    Ok(DepreciationResult {
        depreciation: EquipmentDepreciation {
            total_job_days,
            lines,
            total,
        },
        audit_step,
    })
}
