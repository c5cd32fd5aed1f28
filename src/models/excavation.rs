//! Imported material and excavation line items, plus the excavation
//! equipment pool they reference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numeric::{
    lenient_bool, lenient_decimal, lenient_optional_decimal, lenient_optional_string,
};

/// Material brought onto site (road base, fill, crushed rock).
///
/// # Example
///
/// ```
/// use asphalt_estimator::models::ImportMaterial;
/// use rust_decimal::Decimal;
///
/// let item: ImportMaterial = serde_json::from_str(
///     r#"{"material": "Road Base", "area": 50, "depth": "150", "costPerTonne": 42}"#,
/// ).unwrap();
/// assert_eq!(item.depth, Decimal::from(150));
/// assert!(item.volume.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportMaterial {
    /// Material name, resolved against the material table.
    pub material: String,
    /// Area in m².
    #[serde(deserialize_with = "lenient_decimal")]
    pub area: Decimal,
    /// Compacted depth in mm.
    #[serde(deserialize_with = "lenient_decimal")]
    pub depth: Decimal,
    /// Loose volume in m³; authoritative when greater than zero.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub volume: Option<Decimal>,
    /// Density in kg/m³; overrides the table when greater than zero.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub density: Option<Decimal>,
    /// Compaction percentage; overrides the table when present.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub compaction_percent: Option<Decimal>,
    /// Supply price per tonne.
    #[serde(deserialize_with = "lenient_decimal")]
    pub cost_per_tonne: Decimal,
    /// Machine hours spent placing the material.
    #[serde(deserialize_with = "lenient_decimal")]
    pub machine_hours: Decimal,
    /// Tip fee entered against the line.
    #[serde(deserialize_with = "lenient_decimal")]
    pub tip_fee: Decimal,
}

/// Where excavated material goes.
///
/// Parsed from the display names used on the estimate form. Names that match
/// no known route are kept verbatim in [`DisposalType::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisposalType {
    /// Kept on site; never attracts a disposal cost.
    Reuse,
    /// Clean fill tip.
    #[default]
    CleanFill,
    /// Fill with contamination below the hazardous threshold.
    DirtyFill,
    /// General waste transfer station.
    GeneralWaste,
    /// Licensed contaminated-soil facility.
    Contaminated,
    /// Any other named route.
    Other(String),
}

impl DisposalType {
    /// Parses a route name, ignoring case, spaces, hyphens and underscores.
    ///
    /// An empty name reads as [`DisposalType::CleanFill`].
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::models::DisposalType;
    ///
    /// assert_eq!(DisposalType::parse("Clean Fill"), DisposalType::CleanFill);
    /// assert_eq!(DisposalType::parse("reuse"), DisposalType::Reuse);
    /// assert_eq!(DisposalType::parse("Quarry"), DisposalType::Other("Quarry".to_string()));
    /// ```
    pub fn parse(name: &str) -> Self {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "" | "cleanfill" => DisposalType::CleanFill,
            "reuse" => DisposalType::Reuse,
            "dirtyfill" => DisposalType::DirtyFill,
            "generalwaste" => DisposalType::GeneralWaste,
            "contaminated" => DisposalType::Contaminated,
            _ => DisposalType::Other(name.trim().to_string()),
        }
    }

    /// The display name, also used as the disposal bucket key.
    pub fn name(&self) -> &str {
        match self {
            DisposalType::Reuse => "Reuse",
            DisposalType::CleanFill => "Clean Fill",
            DisposalType::DirtyFill => "Dirty Fill",
            DisposalType::GeneralWaste => "General Waste",
            DisposalType::Contaminated => "Contaminated",
            DisposalType::Other(name) => name,
        }
    }
}

impl From<String> for DisposalType {
    fn from(name: String) -> Self {
        DisposalType::parse(&name)
    }
}

impl From<DisposalType> for String {
    fn from(disposal: DisposalType) -> Self {
        disposal.name().to_string()
    }
}

impl std::fmt::Display for DisposalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One excavation line: material dug out, how long the machine ran and
/// where the spoil goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcavationItem {
    /// Free-text description.
    pub description: String,
    /// Area in m².
    #[serde(deserialize_with = "lenient_decimal")]
    pub area: Decimal,
    /// Material name, resolved against the material table.
    pub material: String,
    /// Depth in mm.
    #[serde(deserialize_with = "lenient_decimal")]
    pub depth: Decimal,
    /// Loose volume in m³; authoritative when greater than zero.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub volume: Option<Decimal>,
    /// Density in kg/m³; overrides the table when greater than zero.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub density: Option<Decimal>,
    /// Compaction (bulking) percentage; overrides the table when present.
    #[serde(deserialize_with = "lenient_optional_decimal")]
    pub compaction_percent: Option<Decimal>,
    /// Hours of machine time on the assigned equipment.
    #[serde(deserialize_with = "lenient_decimal")]
    pub machine_hours: Decimal,
    /// Disposal route.
    pub disposal: DisposalType,
    /// Whether clean fill is contaminated and must go to a dirty fill tip.
    #[serde(deserialize_with = "lenient_bool")]
    pub is_dirty: bool,
    /// Tip fee per tonne; zero or absent means no disposal charge.
    #[serde(deserialize_with = "lenient_decimal")]
    pub tip_fee: Decimal,
    /// Id of the machine in the excavation equipment pool.
    #[serde(deserialize_with = "lenient_optional_string")]
    pub equipment_id: Option<String>,
    /// Whether a third-party contractor performs the work.
    #[serde(deserialize_with = "lenient_bool")]
    pub is_third_party: bool,
    /// Third-party charge.
    #[serde(deserialize_with = "lenient_decimal")]
    pub cost_per_tonne: Decimal,
}

/// A machine in the excavation equipment pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExcavationEquipment {
    /// Identifier referenced by [`ExcavationItem::equipment_id`].
    #[serde(deserialize_with = "lenient_optional_string")]
    pub id: Option<String>,
    /// Machine type, also the machine cost bucket key (e.g. "5t Excavator").
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Hire or running rate per hour.
    #[serde(deserialize_with = "lenient_decimal")]
    pub hourly_rate: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_disposal_parse_known_routes() {
        assert_eq!(DisposalType::parse("Reuse"), DisposalType::Reuse);
        assert_eq!(DisposalType::parse("clean-fill"), DisposalType::CleanFill);
        assert_eq!(DisposalType::parse("DIRTY_FILL"), DisposalType::DirtyFill);
        assert_eq!(DisposalType::parse("General Waste"), DisposalType::GeneralWaste);
        assert_eq!(DisposalType::parse("contaminated"), DisposalType::Contaminated);
    }

    #[test]
    fn test_disposal_empty_name_is_clean_fill() {
        assert_eq!(DisposalType::parse(""), DisposalType::CleanFill);
        assert_eq!(DisposalType::parse("   "), DisposalType::CleanFill);
    }

    #[test]
    fn test_disposal_unknown_route_kept_verbatim() {
        let disposal = DisposalType::parse(" Asbestos Cell ");
        assert_eq!(disposal, DisposalType::Other("Asbestos Cell".to_string()));
        assert_eq!(disposal.name(), "Asbestos Cell");
    }

    #[test]
    fn test_disposal_serializes_as_display_name() {
        let json = serde_json::to_string(&DisposalType::GeneralWaste).unwrap();
        assert_eq!(json, "\"General Waste\"");
    }

    #[test]
    fn test_excavation_item_from_form_document() {
        let item: ExcavationItem = serde_json::from_str(
            r#"{
                "description": "Strip existing pavement",
                "area": "40",
                "material": "Clean Fill",
                "depth": 200,
                "volume": "",
                "machineHours": "3",
                "disposal": "Clean Fill",
                "isDirty": "yes",
                "tipFee": "",
                "equipmentId": 2
            }"#,
        )
        .unwrap();
        assert_eq!(item.area, dec("40"));
        assert_eq!(item.volume, None);
        assert_eq!(item.machine_hours, dec("3"));
        assert_eq!(item.disposal, DisposalType::CleanFill);
        assert!(item.is_dirty);
        assert_eq!(item.tip_fee, Decimal::ZERO);
        assert_eq!(item.equipment_id, Some("2".to_string()));
        assert!(!item.is_third_party);
    }

    #[test]
    fn test_missing_disposal_defaults_to_clean_fill() {
        let item: ExcavationItem = serde_json::from_str(r#"{"area": 1, "depth": 1}"#).unwrap();
        assert_eq!(item.disposal, DisposalType::CleanFill);
    }

    #[test]
    fn test_import_material_explicit_volume() {
        let item: ImportMaterial =
            serde_json::from_str(r#"{"material": "Sand", "volume": "2.5", "density": 0}"#)
                .unwrap();
        assert_eq!(item.volume, Some(dec("2.5")));
        assert_eq!(item.density, Some(Decimal::ZERO));
        assert_eq!(item.compaction_percent, None);
    }

    #[test]
    fn test_excavation_equipment_numeric_id() {
        let machine: ExcavationEquipment =
            serde_json::from_str(r#"{"id": 7, "type": "5t Excavator", "hourlyRate": "95"}"#)
                .unwrap();
        assert_eq!(machine.id, Some("7".to_string()));
        assert_eq!(machine.equipment_type, "5t Excavator");
        assert_eq!(machine.hourly_rate, dec("95"));
    }
}
