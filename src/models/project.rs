//! Project input model and its fixed-schema sections.
//!
//! A [`ProjectInput`] is an immutable snapshot of everything entered for one
//! estimate. It is built once (usually from an
//! [`EstimateRequest`](crate::api::EstimateRequest)) and passed whole to
//! [`estimate`](crate::calculation::estimate).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::excavation::{ExcavationEquipment, ExcavationItem, ImportMaterial};
use super::labor::{LaborModel, Oncosts, OtherLaborItem};
use super::numeric::{
    lenient_bool, lenient_count, lenient_decimal, lenient_optional_decimal,
    lenient_optional_string,
};

/// The complete input for one estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    /// The asphalt surface layer.
    pub asphalt: AsphaltLayer,
    /// Imported materials (base course, fill) in entry order.
    pub import_materials: Vec<ImportMaterial>,
    /// Excavation line items in entry order.
    pub excavation_items: Vec<ExcavationItem>,
    /// The labor source: a single legacy block or a list of crew roles.
    pub labor: LaborModel,
    /// Employer oncost percentages applied to every labor rate.
    pub oncosts: Oncosts,
    /// Additional labor such as subcontractors.
    pub other_labor_items: Vec<OtherLaborItem>,
    /// Owned plant used on the job, for depreciation.
    pub equipment_units: EquipmentUnits,
    /// Hire or owned machines that excavation items can be assigned to.
    pub excavation_equipment: Vec<ExcavationEquipment>,
    /// Paint and fuel.
    pub consumables: Consumables,
    /// Traffic management requirements.
    pub traffic_control: TrafficControl,
    /// Tack coat applied under the asphalt.
    pub emulsion: Emulsion,
    /// Pricing settings for the quote.
    pub project: ProjectSettings,
}

impl ProjectInput {
    /// The area all per-square-metre figures are expressed against.
    pub fn total_area(&self) -> Decimal {
        self.asphalt.area
    }
}

/// The single asphalt layer being laid.
///
/// # Example
///
/// ```
/// use asphalt_estimator::models::AsphaltLayer;
/// use rust_decimal::Decimal;
///
/// let layer: AsphaltLayer = serde_json::from_str(
///     r#"{"area": "100", "depth": 50, "density": 2400, "costPerTonne": "190"}"#,
/// ).unwrap();
/// assert_eq!(layer.area, Decimal::from(100));
/// assert_eq!(layer.cost_per_tonne, Decimal::from(190));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AsphaltLayer {
    /// Paved area in m².
    #[serde(deserialize_with = "lenient_decimal")]
    pub area: Decimal,
    /// Compacted depth in mm.
    #[serde(deserialize_with = "lenient_decimal")]
    pub depth: Decimal,
    /// Density in kg/m³; zero means "use the asphalt default".
    #[serde(deserialize_with = "lenient_decimal")]
    pub density: Decimal,
    /// Supply price per tonne.
    #[serde(deserialize_with = "lenient_decimal")]
    pub cost_per_tonne: Decimal,
}

/// Tack coat (bitumen emulsion) product and application rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Emulsion {
    /// Product name, informational only.
    #[serde(rename = "type")]
    pub emulsion_type: String,
    /// Spray rate in litres per m².
    #[serde(rename = "coveragePerM2", deserialize_with = "lenient_decimal")]
    pub coverage_per_m2: Decimal,
    /// Price per litre.
    #[serde(deserialize_with = "lenient_decimal")]
    pub cost_per_litre: Decimal,
}

/// A consumable quantity and its unit price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consumable {
    /// Units consumed (tins, litres).
    #[serde(deserialize_with = "lenient_decimal")]
    pub quantity: Decimal,
    /// Price per unit.
    #[serde(deserialize_with = "lenient_decimal")]
    pub unit_cost: Decimal,
}

/// Consumables used on the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Consumables {
    /// Line marking paint.
    pub paint: Consumable,
    /// Petrol for small plant.
    pub petrol: Consumable,
    /// Diesel for trucks and rollers.
    pub diesel: Consumable,
    /// Gas for heating and torches.
    pub gas: Consumable,
}

/// Traffic management complexity rating.
///
/// Unrecognised ratings read as [`Complexity::Low`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Complexity {
    /// Quiet street, simple setup.
    #[default]
    Low,
    /// Moderate traffic.
    Medium,
    /// Busy road or intersection.
    High,
    /// Arterial or highway works.
    Critical,
}

impl Complexity {
    /// Parses a rating name case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Complexity::Medium,
            "high" => Complexity::High,
            "critical" => Complexity::Critical,
            _ => Complexity::Low,
        }
    }
}

impl From<String> for Complexity {
    fn from(name: String) -> Self {
        Complexity::parse(&name)
    }
}

impl From<Complexity> for String {
    fn from(complexity: Complexity) -> Self {
        complexity.to_string()
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Low => write!(f, "Low"),
            Complexity::Medium => write!(f, "Medium"),
            Complexity::High => write!(f, "High"),
            Complexity::Critical => write!(f, "Critical"),
        }
    }
}

/// Traffic management requirements for the job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrafficControl {
    /// Whether traffic control is needed at all.
    #[serde(deserialize_with = "lenient_bool")]
    pub required: bool,
    /// Hours of traffic control per controller.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hours: Decimal,
    /// Number of traffic controllers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub workers: Decimal,
    /// Hourly rate per controller.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hourly_rate: Decimal,
    /// Site complexity rating.
    pub complexity: Complexity,
    /// Requested equipment by name.
    pub equipment_list: Vec<String>,
    /// Required permits by name.
    pub permit_list: Vec<String>,
    /// Expected weather conditions by name.
    pub weather_list: Vec<String>,
}

/// The fixed set of owned equipment kinds that are depreciated against a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    /// Plate compactor.
    CompactorPlate,
    /// Rammer (trench) compactor.
    RammerCompactor,
    /// Leaf blower for surface cleaning.
    LeafBlower,
    /// Concrete/asphalt saw.
    ConcreteCutter,
    /// 1 tonne roller.
    OneTRoller,
    /// 2 tonne roller.
    TwoTRoller,
    /// Skid steer loader.
    Skidsteer,
    /// Medium rigid truck.
    MrTruck,
    /// Heavy rigid truck.
    HrTruck,
    /// Plant trailer.
    Trailer,
    /// Site vehicle.
    Car,
}

impl EquipmentKind {
    /// Every equipment kind, in the order results are reported.
    pub const ALL: [EquipmentKind; 11] = [
        EquipmentKind::CompactorPlate,
        EquipmentKind::RammerCompactor,
        EquipmentKind::LeafBlower,
        EquipmentKind::ConcreteCutter,
        EquipmentKind::OneTRoller,
        EquipmentKind::TwoTRoller,
        EquipmentKind::Skidsteer,
        EquipmentKind::MrTruck,
        EquipmentKind::HrTruck,
        EquipmentKind::Trailer,
        EquipmentKind::Car,
    ];
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EquipmentKind::CompactorPlate => "compactor_plate",
            EquipmentKind::RammerCompactor => "rammer_compactor",
            EquipmentKind::LeafBlower => "leaf_blower",
            EquipmentKind::ConcreteCutter => "concrete_cutter",
            EquipmentKind::OneTRoller => "one_t_roller",
            EquipmentKind::TwoTRoller => "two_t_roller",
            EquipmentKind::Skidsteer => "skidsteer",
            EquipmentKind::MrTruck => "mr_truck",
            EquipmentKind::HrTruck => "hr_truck",
            EquipmentKind::Trailer => "trailer",
            EquipmentKind::Car => "car",
        };
        write!(f, "{}", name)
    }
}

/// Unit counts for each owned equipment kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentUnits {
    /// Plate compactors.
    #[serde(deserialize_with = "lenient_decimal")]
    pub compactor_plate: Decimal,
    /// Rammer compactors.
    #[serde(deserialize_with = "lenient_decimal")]
    pub rammer_compactor: Decimal,
    /// Leaf blowers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub leaf_blower: Decimal,
    /// Concrete cutters.
    #[serde(deserialize_with = "lenient_decimal")]
    pub concrete_cutter: Decimal,
    /// 1 t rollers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub one_t_roller: Decimal,
    /// 2 t rollers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub two_t_roller: Decimal,
    /// Skid steers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub skidsteer: Decimal,
    /// Medium rigid trucks.
    #[serde(deserialize_with = "lenient_decimal")]
    pub mr_truck: Decimal,
    /// Heavy rigid trucks.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hr_truck: Decimal,
    /// Plant trailers.
    #[serde(deserialize_with = "lenient_decimal")]
    pub trailer: Decimal,
    /// Site vehicles.
    #[serde(deserialize_with = "lenient_decimal")]
    pub car: Decimal,
}

impl EquipmentUnits {
    /// Returns the unit count for an equipment kind.
    pub fn count(&self, kind: EquipmentKind) -> Decimal {
        match kind {
            EquipmentKind::CompactorPlate => self.compactor_plate,
            EquipmentKind::RammerCompactor => self.rammer_compactor,
            EquipmentKind::LeafBlower => self.leaf_blower,
            EquipmentKind::ConcreteCutter => self.concrete_cutter,
            EquipmentKind::OneTRoller => self.one_t_roller,
            EquipmentKind::TwoTRoller => self.two_t_roller,
            EquipmentKind::Skidsteer => self.skidsteer,
            EquipmentKind::MrTruck => self.mr_truck,
            EquipmentKind::HrTruck => self.hr_truck,
            EquipmentKind::Trailer => self.trailer,
            EquipmentKind::Car => self.car,
        }
    }
}

/// Quote-level pricing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    /// Quote reference, informational only.
    #[serde(deserialize_with = "lenient_optional_string")]
    pub quote_number: Option<String>,
    /// Profit margin as a percentage of the quoted price.
    #[serde(deserialize_with = "lenient_decimal")]
    pub profit_margin_pct: Decimal,
    /// Discount as a percentage of the quoted price.
    #[serde(deserialize_with = "lenient_decimal")]
    pub discount_pct: Decimal,
    /// GST rate applied after discount.
    ///
    /// Absent, `null` or blank reads as [`DEFAULT_TAX_RATE_PCT`]; an explicit
    /// `0` is a zero rate.
    #[serde(deserialize_with = "tax_rate_or_default")]
    pub tax_rate_pct: Decimal,
    /// How many days the quote stays valid.
    #[serde(deserialize_with = "lenient_count")]
    pub valid_for_days: u32,
    /// Date the quote is issued; enables `validUntil` on the result.
    pub issue_date: Option<NaiveDate>,
}

/// GST rate used when a document does not give one.
pub const DEFAULT_TAX_RATE_PCT: Decimal = Decimal::TEN;

fn tax_rate_or_default<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_optional_decimal(deserializer)?.unwrap_or(DEFAULT_TAX_RATE_PCT))
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            quote_number: None,
            profit_margin_pct: Decimal::ZERO,
            discount_pct: Decimal::ZERO,
            tax_rate_pct: DEFAULT_TAX_RATE_PCT,
            valid_for_days: 30,
            issue_date: None,
        }
    }
}
