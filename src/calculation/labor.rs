//! Crew labor cost calculation.
//!
//! This module prices the crew from either the legacy single-crew block or
//! the role list, applying oncost loading and exactly one penalty rule per
//! line.
//!
//! # Penalty Rule Priority
//!
//! Rules are evaluated top-down and the first match prices the line; flags
//! never combine.
//!
//! | Priority | Rule          | Applies when                            |
//! |----------|---------------|-----------------------------------------|
//! | 1        | PublicHoliday | public holiday                          |
//! | 2        | Sunday        | Sunday                                  |
//! | 3        | Saturday      | Saturday                                |
//! | 4        | DailyOvertime | days > 0 and hours per day > threshold  |
//! | 5        | AfterHours    | after hours                             |
//! | 6        | Ordinary      | always                                  |
//!
//! Under daily overtime, hours up to the threshold each day are paid at the
//! after-hours multiplier (after-hours work) or the ordinary multiplier, and
//! the remainder at the overtime multiplier.

use rust_decimal::Decimal;

use crate::config::LaborRates;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, LaborCost, LaborLine, LaborModel, LaborRole, LaborSource, LegacyLabor, Oncosts,
    PenaltyFlags, PenaltyRule,
};

use super::arithmetic::{difference, overflow, product, sum};

/// Role name reported for the legacy crew block.
pub const LEGACY_CREW_ROLE: &str = "Crew";

/// The working pattern a penalty rule is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPattern {
    /// Penalty conditions.
    pub flags: PenaltyFlags,
    /// Hours per worker per day.
    pub hours_per_day: Decimal,
    /// Days worked.
    pub days: Decimal,
}

/// Decides whether a penalty rule applies, given the ordinary hours per day.
pub type RulePredicate = fn(&WorkPattern, Decimal) -> bool;

fn on_public_holiday(pattern: &WorkPattern, _threshold: Decimal) -> bool {
    pattern.flags.public_holiday
}

fn on_sunday(pattern: &WorkPattern, _threshold: Decimal) -> bool {
    pattern.flags.sunday
}

fn on_saturday(pattern: &WorkPattern, _threshold: Decimal) -> bool {
    pattern.flags.saturday
}

fn past_daily_threshold(pattern: &WorkPattern, threshold: Decimal) -> bool {
    pattern.days > Decimal::ZERO && pattern.hours_per_day > threshold
}

fn after_hours(pattern: &WorkPattern, _threshold: Decimal) -> bool {
    pattern.flags.after_hours
}

fn always(_pattern: &WorkPattern, _threshold: Decimal) -> bool {
    true
}

/// Penalty rules in priority order.
pub const PENALTY_PRIORITY: [(PenaltyRule, RulePredicate); 6] = [
    (PenaltyRule::PublicHoliday, on_public_holiday),
    (PenaltyRule::Sunday, on_sunday),
    (PenaltyRule::Saturday, on_saturday),
    (PenaltyRule::DailyOvertime, past_daily_threshold),
    (PenaltyRule::AfterHours, after_hours),
    (PenaltyRule::Ordinary, always),
];

/// Selects the first penalty rule in [`PENALTY_PRIORITY`] that applies.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::{select_penalty_rule, WorkPattern};
/// use asphalt_estimator::models::{PenaltyFlags, PenaltyRule};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pattern = WorkPattern {
///     flags: PenaltyFlags { saturday: true, after_hours: true, ..PenaltyFlags::default() },
///     hours_per_day: Decimal::from(10),
///     days: Decimal::ONE,
/// };
/// let threshold = Decimal::from_str("7.6").unwrap();
/// assert_eq!(select_penalty_rule(&pattern, threshold), PenaltyRule::Saturday);
/// ```
pub fn select_penalty_rule(pattern: &WorkPattern, ordinary_hours_per_day: Decimal) -> PenaltyRule {
    PENALTY_PRIORITY
        .iter()
        .find(|(_, applies)| applies(pattern, ordinary_hours_per_day))
        .map(|(rule, _)| *rule)
        .unwrap_or(PenaltyRule::Ordinary)
}

/// The result of a crew labor calculation.
#[derive(Debug, Clone)]
pub struct LaborResult {
    /// Priced lines and totals.
    pub labor_cost: LaborCost,
    /// One audit step per priced line.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates crew labor cost.
///
/// The legacy block and the role list are mutually exclusive: the
/// [`LaborModel`] variant decides which one prices the crew.
///
/// # Arguments
///
/// * `model` - The labor source
/// * `oncosts` - Oncost percentages applied to every base rate
/// * `rates` - Penalty multipliers and the daily ordinary hours threshold
/// * `start_step_number` - The starting step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when the oncost
/// multiplier, a line cost or a total leaves the decimal range.
pub fn calculate_labor(
    model: &LaborModel,
    oncosts: &Oncosts,
    rates: &LaborRates,
    start_step_number: u32,
) -> EngineResult<LaborResult> {
    let oncost_multiplier = oncosts
        .multiplier()
        .ok_or_else(|| overflow("oncost multiplier"))?;

    let (source, lines) = match model {
        LaborModel::Legacy(legacy) => (
            LaborSource::Legacy,
            vec![price_legacy(legacy, oncost_multiplier, rates)?],
        ),
        LaborModel::Roles(roles) => (
            LaborSource::Roles,
            roles
                .iter()
                .map(|role| price_role(role, oncost_multiplier, rates))
                .collect::<EngineResult<Vec<_>>>()?,
        ),
    };

    let audit_steps = lines
        .iter()
        .zip(start_step_number..)
        .map(|(line, step_number)| line_audit_step(line, oncost_multiplier, step_number))
        .collect();

    let person_hours = lines
        .iter()
        .map(|line| product("labor hours", &[line.workers, line.hours]))
        .collect::<EngineResult<Vec<_>>>()?;
    let total_hours = sum("labor hours", person_hours)?;
    let total_cost = sum("labor cost", lines.iter().map(|line| line.cost))?;

    Ok(LaborResult {
        labor_cost: LaborCost {
            source,
            lines,
            total_hours,
            total_cost,
        },
        audit_steps,
    })
}

fn price_role(
    role: &LaborRole,
    oncost_multiplier: Decimal,
    rates: &LaborRates,
) -> EngineResult<LaborLine> {
    let pattern = WorkPattern {
        flags: role.flags,
        hours_per_day: role.hours_per_day,
        days: role.days,
    };
    price_line(
        role.role_type.clone(),
        role.workers,
        pattern,
        product("labor hours", &[role.hours_per_day, role.days])?,
        role.rate,
        oncost_multiplier,
        rates,
    )
}

fn price_legacy(
    legacy: &LegacyLabor,
    oncost_multiplier: Decimal,
    rates: &LaborRates,
) -> EngineResult<LaborLine> {
    let hours_per_day = legacy
        .hours_per_worker
        .checked_div(legacy.job_duration_days)
        .filter(|_| legacy.job_duration_days > Decimal::ZERO)
        .unwrap_or(legacy.hours_per_worker);
    let pattern = WorkPattern {
        flags: legacy.flags,
        hours_per_day,
        days: legacy.job_duration_days,
    };
    price_line(
        LEGACY_CREW_ROLE.to_string(),
        legacy.workers,
        pattern,
        legacy.hours_per_worker,
        legacy.hourly_rate,
        oncost_multiplier,
        rates,
    )
}

fn price_line(
    role: String,
    workers: Decimal,
    pattern: WorkPattern,
    hours: Decimal,
    rate: Decimal,
    oncost_multiplier: Decimal,
    rates: &LaborRates,
) -> EngineResult<LaborLine> {
    let multipliers = &rates.multipliers;
    let threshold = rates.ordinary_hours_per_day;
    let adjusted_rate = product("adjusted rate", &[rate, oncost_multiplier])?;
    let rule = select_penalty_rule(&pattern, threshold);

    let (base_hours, base_multiplier, overtime_hours) = match rule {
        PenaltyRule::PublicHoliday => (hours, multipliers.public_holiday, Decimal::ZERO),
        PenaltyRule::Sunday => (hours, multipliers.sunday, Decimal::ZERO),
        PenaltyRule::Saturday => (hours, multipliers.saturday, Decimal::ZERO),
        PenaltyRule::DailyOvertime => {
            let base_hours = product("labor hours", &[threshold, pattern.days])?;
            let base_multiplier = if pattern.flags.after_hours {
                multipliers.after_hours
            } else {
                multipliers.ordinary
            };
            (base_hours, base_multiplier, difference("overtime hours", hours, base_hours)?)
        }
        PenaltyRule::AfterHours => (hours, multipliers.after_hours, Decimal::ZERO),
        PenaltyRule::Ordinary => (hours, multipliers.ordinary, Decimal::ZERO),
    };
    let overtime_multiplier = if overtime_hours.is_zero() {
        Decimal::ZERO
    } else {
        multipliers.overtime
    };

    let paid_hours = sum(
        "paid hours",
        [
            product("paid hours", &[base_hours, base_multiplier])?,
            product("paid hours", &[overtime_hours, overtime_multiplier])?,
        ],
    )?;
    let cost = product("labor cost", &[workers, adjusted_rate, paid_hours])?;

    Ok(LaborLine {
        role,
        workers,
        hours_per_day: pattern.hours_per_day,
        days: pattern.days,
        hours,
        rate,
        adjusted_rate,
        rule,
        base_hours,
        base_multiplier,
        overtime_hours,
        overtime_multiplier,
        cost,
    })
}

fn line_audit_step(line: &LaborLine, oncost_multiplier: Decimal, step_number: u32) -> AuditStep {
    let reasoning = if line.overtime_hours.is_zero() {
        format!(
            "{} ({}): {} worker(s) × {}h × ${} × {} oncost × {} = ${}",
            line.role,
            line.rule,
            line.workers.normalize(),
            line.hours.normalize(),
            line.rate.normalize(),
            oncost_multiplier.normalize(),
            line.base_multiplier.normalize(),
            line.cost.normalize()
        )
    } else {
        format!(
            "{} ({}): {} worker(s) × ${} × ({}h × {} + {}h × {}) = ${}",
            line.role,
            line.rule,
            line.workers.normalize(),
            line.adjusted_rate.normalize(),
            line.base_hours.normalize(),
            line.base_multiplier.normalize(),
            line.overtime_hours.normalize(),
            line.overtime_multiplier.normalize(),
            line.cost.normalize()
        )
    };

    AuditStep {
        step_number,
        rule_id: format!("labor_{}", line.rule),
        rule_name: "Crew Labor Penalty Rate".to_string(),
        input: serde_json::json!({
            "role": line.role,
            "workers": line.workers.normalize().to_string(),
            "hours_per_day": line.hours_per_day.normalize().to_string(),
            "days": line.days.normalize().to_string(),
            "rate": line.rate.normalize().to_string(),
            "oncost_multiplier": oncost_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "rule": line.rule.to_string(),
            "adjusted_rate": line.adjusted_rate.normalize().to_string(),
            "base_hours": line.base_hours.normalize().to_string(),
            "base_multiplier": line.base_multiplier.normalize().to_string(),
            "overtime_hours": line.overtime_hours.normalize().to_string(),
            "overtime_multiplier": line.overtime_multiplier.normalize().to_string(),
            "cost": line.cost.normalize().to_string()
        }),
        reasoning,
    }
}
