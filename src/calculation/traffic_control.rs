//! Traffic management costing.
//!
//! ```text
//! base  = hours × workers × hourlyRate × complexity
//! total = (base + equipment + permits) × worstWeather
//! ```
//!
//! Equipment and permits are summed from price lists unless the bundle entry
//! ("All Equipment", "Multiple Permits") is requested, which replaces the
//! itemized sum with a flat price.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::{PriceList, TrafficControlRates};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning, TrafficControl, TrafficControlCost};

use super::arithmetic::{product, sum};

/// Warning code raised when a traffic control item matches no price.
pub const UNKNOWN_TRAFFIC_ITEM_WARNING: &str = "UNKNOWN_TRAFFIC_ITEM";

/// The result of a traffic control calculation.
#[derive(Debug, Clone)]
pub struct TrafficControlResult {
    /// Cost components and total.
    pub cost: TrafficControlCost,
    /// Names that matched no price or multiplier.
    pub warnings: Vec<AuditWarning>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates traffic management cost; zero when not required.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when the controller cost
/// or the total leaves the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::calculate_traffic_control;
/// use asphalt_estimator::config::EstimatorConfig;
/// use asphalt_estimator::models::{Complexity, TrafficControl};
/// use rust_decimal::Decimal;
///
/// let traffic = TrafficControl {
///     required: true,
///     hours: Decimal::from(8),
///     workers: Decimal::from(2),
///     hourly_rate: Decimal::from(60),
///     complexity: Complexity::Medium,
///     equipment_list: vec!["Cones".to_string()],
///     permit_list: vec![],
///     weather_list: vec![],
/// };
/// let config = EstimatorConfig::standard();
/// let result = calculate_traffic_control(&traffic, config.traffic_control(), 1).unwrap();
/// // 8 × 2 × 60 × 1.25 + 100
/// assert_eq!(result.cost.total, Decimal::from(1300));
/// ```
pub fn calculate_traffic_control(
    traffic: &TrafficControl,
    rates: &TrafficControlRates,
    step_number: u32,
) -> EngineResult<TrafficControlResult> {
    if !traffic.required {
        return Ok(TrafficControlResult {
            cost: TrafficControlCost {
                required: false,
                complexity_multiplier: Decimal::ONE,
                weather_multiplier: Decimal::ONE,
                ..TrafficControlCost::default()
            },
            warnings: Vec::new(),
            audit_step: AuditStep {
                step_number,
                rule_id: "traffic_control".to_string(),
                rule_name: "Traffic Control".to_string(),
                input: serde_json::json!({ "required": false }),
                output: serde_json::json!({ "total": "0" }),
                reasoning: "Traffic control not required".to_string(),
            },
        });
    }

    let mut warnings = Vec::new();

    let complexity_multiplier = rates.complexity.multiplier(traffic.complexity);
    let base_cost = product(
        "traffic controller cost",
        &[
            traffic.hours,
            traffic.workers,
            traffic.hourly_rate,
            complexity_multiplier,
        ],
    )?;

    let equipment_cost = price_items(
        &traffic.equipment_list,
        &rates.equipment,
        "equipment",
        &mut warnings,
    )?;
    let permit_cost = price_items(&traffic.permit_list, &rates.permits, "permit", &mut warnings)?;

    let mut worst_weather: Option<Decimal> = None;
    for condition in named(&traffic.weather_list) {
        match rates.weather_multiplier(condition) {
            Some(multiplier) => {
                worst_weather = Some(worst_weather.map_or(multiplier, |m| m.max(multiplier)));
            }
            None => warnings.push(unknown_item("weather condition", condition)),
        }
    }
    let weather_multiplier = worst_weather.unwrap_or(Decimal::ONE);

    let subtotal = sum("traffic control total", [base_cost, equipment_cost, permit_cost])?;
    let total = product("traffic control total", &[subtotal, weather_multiplier])?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "traffic_control".to_string(),
        rule_name: "Traffic Control".to_string(),
        input: serde_json::json!({
            "required": true,
            "hours": traffic.hours.normalize().to_string(),
            "workers": traffic.workers.normalize().to_string(),
            "hourly_rate": traffic.hourly_rate.normalize().to_string(),
            "complexity": traffic.complexity.to_string(),
            "equipment": traffic.equipment_list,
            "permits": traffic.permit_list,
            "weather": traffic.weather_list
        }),
        output: serde_json::json!({
            "complexity_multiplier": complexity_multiplier.normalize().to_string(),
            "base_cost": base_cost.normalize().to_string(),
            "equipment_cost": equipment_cost.normalize().to_string(),
            "permit_cost": permit_cost.normalize().to_string(),
            "weather_multiplier": weather_multiplier.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Traffic control: (${} base + ${} equipment + ${} permits) × {} weather = ${}",
            base_cost.normalize(),
            equipment_cost.normalize(),
            permit_cost.normalize(),
            weather_multiplier.normalize(),
            total.normalize()
        ),
    };

    Ok(TrafficControlResult {
        cost: TrafficControlCost {
            required: true,
            base_cost,
            complexity_multiplier,
            equipment_cost,
            permit_cost,
            weather_multiplier,
            total,
        },
        warnings,
        audit_step,
    })
}

fn named(names: &[String]) -> impl Iterator<Item = &str> {
    names.iter().map(|name| name.trim()).filter(|name| !name.is_empty())
}

fn price_items(
    names: &[String],
    prices: &PriceList,
    kind: &str,
    warnings: &mut Vec<AuditWarning>,
) -> EngineResult<Decimal> {
    if named(names).any(|name| prices.is_bundle(name)) {
        return Ok(prices.bundle.price);
    }

    let mut priced = Vec::new();
    for name in named(names) {
        match prices.price(name) {
            Some(price) => priced.push(price),
            None => warnings.push(unknown_item(kind, name)),
        }
    }
    sum("traffic control items", priced)
}

fn unknown_item(kind: &str, name: &str) -> AuditWarning {
    warn!(kind = %kind, item = %name, "Unknown traffic control item ignored");
    AuditWarning {
        code: UNKNOWN_TRAFFIC_ITEM_WARNING.to_string(),
        message: format!("Unknown traffic control {} '{}' ignored", kind, name),
        severity: "low".to_string(),
    }
}
