//! Configuration types for the paving estimator.
//!
//! This module contains the strongly-typed rate tables that are deserialized
//! from the YAML files of a configuration directory, together with the
//! built-in standard rates.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::models::{Complexity, EquipmentKind};

/// Metadata about the rate set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EstimatorMetadata {
    /// Short identifier of the rate set (e.g., "standard").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version or effective date of the rates.
    pub version: String,
    /// Currency all prices are expressed in.
    pub currency: String,
}

/// Multipliers for each penalty rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PenaltyMultipliers {
    /// Public holiday rate.
    pub public_holiday: Decimal,
    /// Sunday rate.
    pub sunday: Decimal,
    /// Saturday rate.
    pub saturday: Decimal,
    /// After-hours rate; also applies to ordinary hours of an after-hours
    /// day that runs into overtime.
    pub after_hours: Decimal,
    /// Rate for hours past the daily ordinary threshold.
    pub overtime: Decimal,
    /// Ordinary rate.
    pub ordinary: Decimal,
}

/// Labor rates from labor.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaborRates {
    /// Ordinary hours per day before daily overtime applies.
    pub ordinary_hours_per_day: Decimal,
    /// Penalty multipliers.
    pub multipliers: PenaltyMultipliers,
}

/// Straight-line depreciation inputs for one equipment kind.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepreciationSchedule {
    /// Purchase price of one unit.
    pub unit_cost: Decimal,
    /// Value at end of life.
    pub residual_value: Decimal,
    /// Useful life in years.
    pub useful_life_years: Decimal,
}

/// Depreciation settings from equipment.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DepreciationConfig {
    /// Working days in a year.
    pub working_days_per_year: Decimal,
    /// Hours in a job day, used to turn labor hours into job days.
    pub hours_per_job_day: Decimal,
    /// Schedule per equipment kind; every kind must be present.
    pub schedules: BTreeMap<EquipmentKind, DepreciationSchedule>,
}

impl DepreciationConfig {
    /// Returns the schedule for an equipment kind.
    pub fn schedule(&self, kind: EquipmentKind) -> Option<&DepreciationSchedule> {
        self.schedules.get(&kind)
    }
}

/// Multipliers applied to controller cost by site complexity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComplexityMultipliers {
    /// Low complexity.
    pub low: Decimal,
    /// Medium complexity.
    pub medium: Decimal,
    /// High complexity.
    pub high: Decimal,
    /// Critical complexity.
    pub critical: Decimal,
}

impl ComplexityMultipliers {
    /// Returns the multiplier for a complexity rating.
    pub fn multiplier(&self, complexity: Complexity) -> Decimal {
        match complexity {
            Complexity::Low => self.low,
            Complexity::Medium => self.medium,
            Complexity::High => self.high,
            Complexity::Critical => self.critical,
        }
    }
}

/// A named entry that replaces the itemized sum with a flat price.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlatBundle {
    /// Name that selects the bundle (e.g., "All Equipment").
    pub name: String,
    /// Flat price charged instead of the itemized sum.
    pub price: Decimal,
}

/// A price list of named items with an all-inclusive bundle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceList {
    /// Price per item name.
    pub items: BTreeMap<String, Decimal>,
    /// Bundle that short-circuits to a flat price.
    pub bundle: FlatBundle,
}

impl PriceList {
    /// Looks up an item price, ignoring case and surrounding whitespace.
    pub fn price(&self, name: &str) -> Option<Decimal> {
        lookup_ignore_case(&self.items, name)
    }

    /// Returns true when `name` selects the bundle.
    pub fn is_bundle(&self, name: &str) -> bool {
        self.bundle.name.eq_ignore_ascii_case(name.trim())
    }
}

/// Traffic control rates from traffic_control.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TrafficControlRates {
    /// Complexity multipliers.
    pub complexity: ComplexityMultipliers,
    /// Equipment hire prices.
    pub equipment: PriceList,
    /// Permit fees.
    pub permits: PriceList,
    /// Weather multipliers by condition name.
    pub weather: BTreeMap<String, Decimal>,
}

impl TrafficControlRates {
    /// Looks up a weather multiplier, ignoring case and surrounding whitespace.
    pub fn weather_multiplier(&self, name: &str) -> Option<Decimal> {
        lookup_ignore_case(&self.weather, name)
    }
}

/// Miscellaneous pricing constants from pricing.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PricingRates {
    /// Wastage factor applied to tack coat cost.
    pub emulsion_wastage_factor: Decimal,
    /// GST percentage added to subcontractor labor flagged `addGst`.
    pub subcontractor_gst_pct: Decimal,
}

fn lookup_ignore_case(table: &BTreeMap<String, Decimal>, name: &str) -> Option<Decimal> {
    let name = name.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| *value)
}

/// The complete rate configuration used by the estimator.
///
/// This struct aggregates the rate tables loaded from the YAML files in a
/// configuration directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    metadata: EstimatorMetadata,
    labor: LaborRates,
    depreciation: DepreciationConfig,
    traffic_control: TrafficControlRates,
    pricing: PricingRates,
}

impl EstimatorConfig {
    /// Creates a new EstimatorConfig from its component parts.
    pub fn new(
        metadata: EstimatorMetadata,
        labor: LaborRates,
        depreciation: DepreciationConfig,
        traffic_control: TrafficControlRates,
        pricing: PricingRates,
    ) -> Self {
        Self {
            metadata,
            labor,
            depreciation,
            traffic_control,
            pricing,
        }
    }

    /// The built-in standard rates, identical to `config/standard`.
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::config::EstimatorConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = EstimatorConfig::standard();
    /// assert_eq!(config.depreciation().working_days_per_year, Decimal::from(260));
    /// ```
    pub fn standard() -> Self {
        let d = Decimal::new;

        let schedule = |unit_cost: i64, residual_value: i64, useful_life_years: i64| {
            DepreciationSchedule {
                unit_cost: Decimal::from(unit_cost),
                residual_value: Decimal::from(residual_value),
                useful_life_years: Decimal::from(useful_life_years),
            }
        };
        let schedules = BTreeMap::from([
            (EquipmentKind::CompactorPlate, schedule(3000, 200, 3)),
            (EquipmentKind::RammerCompactor, schedule(1500, 200, 3)),
            (EquipmentKind::LeafBlower, schedule(500, 150, 3)),
            (EquipmentKind::ConcreteCutter, schedule(500, 150, 3)),
            (EquipmentKind::Skidsteer, schedule(40000, 10000, 10)),
            (EquipmentKind::MrTruck, schedule(40000, 10000, 10)),
            (EquipmentKind::HrTruck, schedule(50000, 20000, 10)),
            (EquipmentKind::Trailer, schedule(3500, 1000, 10)),
            (EquipmentKind::Car, schedule(35000, 1000, 10)),
            (EquipmentKind::OneTRoller, schedule(25000, 5000, 5)),
            (EquipmentKind::TwoTRoller, schedule(35000, 10000, 5)),
        ]);

        let prices = |entries: &[(&str, i64)]| {
            entries
                .iter()
                .map(|(name, price)| (name.to_string(), Decimal::from(*price)))
                .collect::<BTreeMap<_, _>>()
        };

        Self {
            metadata: EstimatorMetadata {
                code: "standard".to_string(),
                name: "Standard Paving Rates".to_string(),
                version: "2025-07-01".to_string(),
                currency: "AUD".to_string(),
            },
            labor: LaborRates {
                ordinary_hours_per_day: d(76, 1),
                multipliers: PenaltyMultipliers {
                    public_holiday: d(25, 1),
                    sunday: d(20, 1),
                    saturday: d(15, 1),
                    after_hours: d(15, 1),
                    overtime: d(20, 1),
                    ordinary: d(10, 1),
                },
            },
            depreciation: DepreciationConfig {
                working_days_per_year: Decimal::from(260),
                hours_per_job_day: Decimal::from(10),
                schedules,
            },
            traffic_control: TrafficControlRates {
                complexity: ComplexityMultipliers {
                    low: d(10, 1),
                    medium: d(125, 2),
                    high: d(15, 1),
                    critical: d(20, 1),
                },
                equipment: PriceList {
                    items: prices(&[
                        ("Signage", 150),
                        ("Cones", 100),
                        ("Barriers", 300),
                        ("Arrow Board", 250),
                        ("Portable Traffic Lights", 450),
                        ("VMS Board", 400),
                    ]),
                    bundle: FlatBundle {
                        name: "All Equipment".to_string(),
                        price: Decimal::from(800),
                    },
                },
                permits: PriceList {
                    items: prices(&[
                        ("Council Permit", 250),
                        ("Road Occupancy Permit", 350),
                        ("Traffic Management Plan", 300),
                    ]),
                    bundle: FlatBundle {
                        name: "Multiple Permits".to_string(),
                        price: Decimal::from(800),
                    },
                },
                weather: BTreeMap::from([
                    ("Clear".to_string(), d(10, 1)),
                    ("Light Rain".to_string(), d(11, 1)),
                    ("Heavy Rain".to_string(), d(115, 2)),
                    ("Extreme Weather".to_string(), d(125, 2)),
                ]),
            },
            pricing: PricingRates {
                emulsion_wastage_factor: d(105, 2),
                subcontractor_gst_pct: Decimal::from(10),
            },
        }
    }

    /// Returns the rate set metadata.
    pub fn metadata(&self) -> &EstimatorMetadata {
        &self.metadata
    }

    /// Returns the labor rates.
    pub fn labor(&self) -> &LaborRates {
        &self.labor
    }

    /// Returns the depreciation settings.
    pub fn depreciation(&self) -> &DepreciationConfig {
        &self.depreciation
    }

    /// Returns the traffic control rates.
    pub fn traffic_control(&self) -> &TrafficControlRates {
        &self.traffic_control
    }

    /// Returns the pricing constants.
    pub fn pricing(&self) -> &PricingRates {
        &self.pricing
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_standard_covers_every_equipment_kind() {
        let config = EstimatorConfig::standard();
        for kind in EquipmentKind::ALL {
            assert!(
                config.depreciation().schedule(kind).is_some(),
                "missing schedule for {}",
                kind
            );
        }
    }

    #[test]
    fn test_standard_penalty_multipliers() {
        let config = EstimatorConfig::standard();
        let multipliers = &config.labor().multipliers;
        assert_eq!(multipliers.public_holiday, dec("2.5"));
        assert_eq!(multipliers.sunday, dec("2.0"));
        assert_eq!(multipliers.saturday, dec("1.5"));
        assert_eq!(multipliers.after_hours, dec("1.5"));
        assert_eq!(multipliers.overtime, dec("2.0"));
        assert_eq!(config.labor().ordinary_hours_per_day, dec("7.6"));
    }

    #[test]
    fn test_complexity_multiplier_lookup() {
        let rates = EstimatorConfig::standard().traffic_control().complexity.clone();
        assert_eq!(rates.multiplier(Complexity::Low), dec("1.0"));
        assert_eq!(rates.multiplier(Complexity::Medium), dec("1.25"));
        assert_eq!(rates.multiplier(Complexity::Critical), dec("2.0"));
    }

    #[test]
    fn test_price_list_lookup_ignores_case_and_whitespace() {
        let config = EstimatorConfig::standard();
        let equipment = &config.traffic_control().equipment;
        assert_eq!(equipment.price("  cones "), Some(dec("100")));
        assert_eq!(equipment.price("VMS BOARD"), Some(dec("400")));
        assert_eq!(equipment.price("Flags"), None);
        assert!(equipment.is_bundle("all equipment"));
        assert!(!equipment.is_bundle("Cones"));
    }

    #[test]
    fn test_weather_lookup() {
        let config = EstimatorConfig::standard();
        let rates = config.traffic_control();
        assert_eq!(rates.weather_multiplier("heavy rain"), Some(dec("1.15")));
        assert_eq!(rates.weather_multiplier("Snow"), None);
    }
}
