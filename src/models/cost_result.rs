//! Cost result models for the paving estimator.
//!
//! This module contains the [`CostResult`] type and its associated structures
//! that capture all outputs from an estimate: quantities, itemized section
//! costs, the quote pipeline, per-area metrics, validation issues and the
//! audit trace.
//!
//! A result carries no timestamps, random identifiers or timings, so the
//! same input always produces an identical result.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::labor::PricingMethod;
use super::project::EquipmentKind;

/// Volume and weight derived for one layer or line item.
///
/// # Example
///
/// ```
/// use asphalt_estimator::models::QuantityBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let quantity = QuantityBreakdown {
///     compacted_volume: Decimal::from(5),
///     loose_volume: Decimal::from_str("6.25").unwrap(),
///     weight: Decimal::from(15),
///     density: Decimal::from_str("2.4").unwrap(),
///     compaction_pct: Decimal::from(25),
///     truck_loads: Decimal::from_str("1.76").unwrap(),
/// };
/// assert_eq!(quantity.loose_volume * quantity.density, quantity.weight);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityBreakdown {
    /// In-place (compacted) volume in m³.
    pub compacted_volume: Decimal,
    /// Loose (transportable) volume in m³.
    pub loose_volume: Decimal,
    /// Weight in tonnes.
    pub weight: Decimal,
    /// Density used, in t/m³.
    pub density: Decimal,
    /// Compaction percentage used.
    pub compaction_pct: Decimal,
    /// Truck loads needed to move the weight, rounded to 2 decimal places.
    pub truck_loads: Decimal,
}

/// Supply cost of the asphalt layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsphaltCost {
    /// Quantities for the layer.
    pub quantity: QuantityBreakdown,
    /// Price per tonne.
    pub cost_per_tonne: Decimal,
    /// Weight times price per tonne.
    pub cost: Decimal,
}

/// Supply cost of one imported material line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMaterialCost {
    /// Position of the line in the input.
    pub index: usize,
    /// Material name as entered.
    pub material: String,
    /// Quantities for the line.
    pub quantity: QuantityBreakdown,
    /// Price per tonne.
    pub cost_per_tonne: Decimal,
    /// Machine hours, carried through for display.
    pub machine_hours: Decimal,
    /// Tip fee, carried through for display.
    pub tip_fee: Decimal,
    /// Weight times price per tonne.
    pub cost: Decimal,
}

/// Tack coat quantity and cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmulsionCost {
    /// Litres sprayed.
    pub litres: Decimal,
    /// Price per litre.
    pub cost_per_litre: Decimal,
    /// Wastage factor applied on top of the sprayed quantity.
    pub wastage_factor: Decimal,
    /// Litres times price times wastage.
    pub cost: Decimal,
}

/// Material supply costs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCosts {
    /// The asphalt layer.
    pub asphalt: AsphaltCost,
    /// Imported materials in input order; rejected lines are omitted.
    pub import: Vec<ImportMaterialCost>,
    /// Tack coat.
    pub emulsion: EmulsionCost,
}

/// Cost of one excavation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcavationItemCost {
    /// Position of the line in the input.
    pub index: usize,
    /// Description as entered.
    pub description: String,
    /// Material name as entered.
    pub material: String,
    /// Quantities for the line.
    pub quantity: QuantityBreakdown,
    /// Disposal route the spoil was costed against.
    pub disposal: String,
    /// Tip fee per tonne charged on the weight.
    pub tip_fee: Decimal,
    /// Machine type the hours were charged to, when one was resolved.
    pub equipment_type: Option<String>,
    /// Machine hours times the machine's hourly rate.
    pub machine_cost: Decimal,
    /// Weight times tip fee; zero for reuse.
    pub disposal_cost: Decimal,
    /// Flat third-party charge.
    pub third_party_cost: Decimal,
    /// Sum of the three costs above.
    pub total: Decimal,
}

/// Excavation section costs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcavationCosts {
    /// Costed lines in input order; rejected lines are omitted.
    pub per_item: Vec<ExcavationItemCost>,
    /// Machine cost per machine type.
    pub equipment_totals: BTreeMap<String, Decimal>,
    /// Disposal cost per disposal route.
    pub disposal_totals: BTreeMap<String, Decimal>,
    /// Sum of third-party charges.
    pub third_party_total: Decimal,
    /// Sum of machine costs.
    pub machine_total: Decimal,
    /// Sum of disposal costs.
    pub disposal_total: Decimal,
    /// Sum of imported material supply costs.
    pub import_material_total: Decimal,
    /// Machine, disposal, third-party and import totals combined.
    pub section_total: Decimal,
}

/// The penalty rule that priced a labor line.
///
/// Rules are listed in priority order; the first one whose predicate holds
/// prices all of the line's hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyRule {
    /// Public holiday rate on all hours.
    PublicHoliday,
    /// Sunday rate on all hours.
    Sunday,
    /// Saturday rate on all hours.
    Saturday,
    /// Hours past the daily ordinary threshold at the overtime rate.
    DailyOvertime,
    /// After-hours rate on all hours.
    AfterHours,
    /// Ordinary rate.
    Ordinary,
}

impl std::fmt::Display for PenaltyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PenaltyRule::PublicHoliday => "public_holiday",
            PenaltyRule::Sunday => "sunday",
            PenaltyRule::Saturday => "saturday",
            PenaltyRule::DailyOvertime => "daily_overtime",
            PenaltyRule::AfterHours => "after_hours",
            PenaltyRule::Ordinary => "ordinary",
        };
        write!(f, "{}", name)
    }
}

/// Which labor input priced the crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborSource {
    /// The legacy single-crew block.
    Legacy,
    /// The crew role list.
    Roles,
}

/// One priced crew line (a role, or the legacy block).
///
/// Hours are per worker. `base_hours` are paid at `base_multiplier` and
/// `overtime_hours` at `overtime_multiplier`; outside the daily overtime
/// rule every hour is a base hour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborLine {
    /// Role name ("Crew" for the legacy block).
    pub role: String,
    /// Number of workers.
    pub workers: Decimal,
    /// Hours per worker per day.
    pub hours_per_day: Decimal,
    /// Days worked.
    pub days: Decimal,
    /// Total hours per worker.
    pub hours: Decimal,
    /// Base hourly rate.
    pub rate: Decimal,
    /// Base rate after oncost loading.
    pub adjusted_rate: Decimal,
    /// The penalty rule that fired.
    pub rule: PenaltyRule,
    /// Hours paid at the base multiplier.
    pub base_hours: Decimal,
    /// Multiplier for base hours.
    pub base_multiplier: Decimal,
    /// Hours paid at the overtime multiplier.
    pub overtime_hours: Decimal,
    /// Multiplier for overtime hours.
    pub overtime_multiplier: Decimal,
    /// Line cost.
    pub cost: Decimal,
}

/// Crew labor cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborCost {
    /// Which input priced the crew.
    pub source: LaborSource,
    /// Priced lines.
    pub lines: Vec<LaborLine>,
    /// Person-hours across all lines.
    pub total_hours: Decimal,
    /// Sum of line costs.
    pub total_cost: Decimal,
}

/// One priced additional labor item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherLaborLine {
    /// Position of the item in the input.
    pub index: usize,
    /// Description as entered.
    #[serde(rename = "type")]
    pub labor_type: String,
    /// Hourly or fixed pricing.
    pub pricing_method: PricingMethod,
    /// Cost before GST.
    pub amount: Decimal,
    /// GST added on top, zero unless requested.
    pub gst: Decimal,
    /// Amount plus GST.
    pub cost: Decimal,
}

/// Additional labor cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherLaborCost {
    /// Priced items.
    pub lines: Vec<OtherLaborLine>,
    /// Sum of item costs.
    pub total: Decimal,
}

/// Depreciation charged for one equipment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepreciationLine {
    /// Equipment kind.
    pub kind: EquipmentKind,
    /// Units used on the job.
    pub units: Decimal,
    /// Annual straight-line depreciation for those units.
    pub annual: Decimal,
    /// Depreciation per working day.
    pub daily: Decimal,
    /// Daily depreciation times job days.
    pub cost: Decimal,
}

/// Owned equipment depreciation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDepreciation {
    /// Job days the equipment is charged for.
    pub total_job_days: Decimal,
    /// One line per kind with units on the job.
    pub lines: Vec<DepreciationLine>,
    /// Sum of line costs.
    pub total: Decimal,
}

/// Consumables cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumablesCost {
    /// Paint cost.
    pub paint: Decimal,
    /// Petrol cost.
    pub petrol: Decimal,
    /// Diesel cost.
    pub diesel: Decimal,
    /// Gas cost.
    pub gas: Decimal,
    /// Sum of the four.
    pub total: Decimal,
}

/// Traffic management cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficControlCost {
    /// Whether traffic control was required.
    pub required: bool,
    /// Controller cost after the complexity multiplier.
    pub base_cost: Decimal,
    /// Complexity multiplier applied to controller cost.
    pub complexity_multiplier: Decimal,
    /// Equipment hire.
    pub equipment_cost: Decimal,
    /// Permit fees.
    pub permit_cost: Decimal,
    /// Worst-case weather multiplier.
    pub weather_multiplier: Decimal,
    /// `(base + equipment + permits) × weather`.
    pub total: Decimal,
}

/// Per-square-metre metrics; `None` when the asphalt area is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerSquareMeter {
    /// Total cost per m².
    pub cost: Option<Decimal>,
    /// Total with tax per m².
    pub quote: Option<Decimal>,
    /// Profit per m².
    pub profit: Option<Decimal>,
}

/// Kind of a per-item validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationKind {
    /// The line has neither area and depth nor a volume.
    MissingRequiredQuantity,
}

/// A line item that was excluded from the totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// What was wrong.
    pub kind: ValidationKind,
    /// Input section of the item ("importMaterials" or "excavationItems").
    pub section: String,
    /// Position of the item within its section.
    pub index: usize,
    /// The item's material or description.
    pub item: String,
    /// Human-readable explanation.
    pub message: String,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate a fallback was used; they never change the outcome
/// beyond what the fallback documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for an estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete result of an estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostResult {
    /// Area the per-m² metrics are based on (the asphalt area).
    pub total_area: Decimal,
    /// Material supply.
    pub material_costs: MaterialCosts,
    /// Excavation, disposal and import.
    pub excavation_costs: ExcavationCosts,
    /// Crew labor.
    pub labor_cost: LaborCost,
    /// Additional labor.
    pub other_labor_cost: OtherLaborCost,
    /// Owned equipment depreciation.
    pub equipment_depreciation: EquipmentDepreciation,
    /// Consumables.
    pub consumables_cost: ConsumablesCost,
    /// Traffic management.
    pub traffic_control_cost: TrafficControlCost,
    /// Sum of all section costs.
    pub total_costs: Decimal,
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
    /// Per-m² metrics.
    pub per_square_meter: PerSquareMeter,
    /// Last day the quote is valid, when an issue date was supplied.
    pub valid_until: Option<NaiveDate>,
    /// Line items excluded from the totals.
    pub validation_issues: Vec<ValidationIssue>,
    /// Calculation decisions and warnings.
    pub audit_trace: AuditTrace,
}
