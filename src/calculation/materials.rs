//! Material resolution functionality.
//!
//! This module maps free-text material names onto the fixed material table
//! (density, compaction factor, truck capacity). Unknown names never fail:
//! they resolve to documented defaults and raise a warning.

use rust_decimal::Decimal;
use tracing::warn;

use crate::models::AuditWarning;

/// Warning code raised when a material name is not in the table.
pub const UNKNOWN_MATERIAL_WARNING: &str = "UNKNOWN_MATERIAL";

/// A material in the fixed material table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    /// Hot mix asphalt.
    Asphalt,
    /// Road base (crushed, graded base course).
    RoadBase,
    /// Crushed rock.
    CrushedRock,
    /// Clean fill.
    CleanFill,
    /// Topsoil.
    Topsoil,
    /// Sand.
    Sand,
    /// Gravel.
    Gravel,
    /// Clay.
    Clay,
    /// Concrete (broken out).
    Concrete,
    /// Rock.
    Rock,
}

/// Physical properties used to turn dimensions into weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialProperties {
    /// Density in t/m³.
    pub density: Decimal,
    /// Compaction (bulking) percentage between in-place and loose volume.
    pub compaction_pct: Decimal,
    /// Tonnes one truck carries.
    pub truck_capacity: Decimal,
}

/// Properties used for names that are not in the table.
pub const UNKNOWN_MATERIAL_PROPERTIES: MaterialProperties = MaterialProperties {
    density: Decimal::from_parts(18, 0, 0, false, 1),
    compaction_pct: Decimal::ZERO,
    truck_capacity: Decimal::TEN,
};

impl Material {
    /// Every material in the table.
    pub const ALL: [Material; 10] = [
        Material::Asphalt,
        Material::RoadBase,
        Material::CrushedRock,
        Material::CleanFill,
        Material::Topsoil,
        Material::Sand,
        Material::Gravel,
        Material::Clay,
        Material::Concrete,
        Material::Rock,
    ];

    /// Parses a material name, ignoring case, spaces, hyphens and underscores.
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::calculation::Material;
    ///
    /// assert_eq!(Material::parse("Road Base"), Some(Material::RoadBase));
    /// assert_eq!(Material::parse("crushed_rock"), Some(Material::CrushedRock));
    /// assert_eq!(Material::parse("Unobtainium"), None);
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Material::ALL
            .into_iter()
            .find(|material| material.key() == key)
    }

    fn key(&self) -> &'static str {
        match self {
            Material::Asphalt => "asphalt",
            Material::RoadBase => "roadbase",
            Material::CrushedRock => "crushedrock",
            Material::CleanFill => "cleanfill",
            Material::Topsoil => "topsoil",
            Material::Sand => "sand",
            Material::Gravel => "gravel",
            Material::Clay => "clay",
            Material::Concrete => "concrete",
            Material::Rock => "rock",
        }
    }

    /// The display name of the material.
    pub fn name(&self) -> &'static str {
        match self {
            Material::Asphalt => "Asphalt",
            Material::RoadBase => "Road Base",
            Material::CrushedRock => "Crushed Rock",
            Material::CleanFill => "Clean Fill",
            Material::Topsoil => "Topsoil",
            Material::Sand => "Sand",
            Material::Gravel => "Gravel",
            Material::Clay => "Clay",
            Material::Concrete => "Concrete",
            Material::Rock => "Rock",
        }
    }

    /// The table entry for this material.
    pub fn properties(&self) -> MaterialProperties {
        let (density, compaction, truck) = match self {
            Material::Asphalt => (Decimal::new(24, 1), 25, Decimal::new(85, 1)),
            Material::RoadBase => (Decimal::new(22, 1), 20, Decimal::new(115, 1)),
            Material::CrushedRock => (Decimal::new(19, 1), 15, Decimal::new(115, 1)),
            Material::CleanFill => (Decimal::new(18, 1), 25, Decimal::TEN),
            Material::Topsoil => (Decimal::new(14, 1), 30, Decimal::TEN),
            Material::Sand => (Decimal::new(16, 1), 12, Decimal::TEN),
            Material::Gravel => (Decimal::new(17, 1), 12, Decimal::TEN),
            Material::Clay => (Decimal::new(19, 1), 30, Decimal::TEN),
            Material::Concrete => (Decimal::new(24, 1), 40, Decimal::TEN),
            Material::Rock => (Decimal::new(26, 1), 50, Decimal::TEN),
        };
        MaterialProperties {
            density,
            compaction_pct: Decimal::from(compaction),
            truck_capacity: truck,
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The outcome of resolving a material name.
#[derive(Debug, Clone)]
pub struct MaterialLookup {
    /// The matched material, if any.
    pub material: Option<Material>,
    /// Table properties, or the unknown-material defaults.
    pub properties: MaterialProperties,
    /// Raised when the name matched nothing.
    pub warning: Option<AuditWarning>,
}

/// Resolves a material name against the table.
///
/// Unknown names resolve to density 1.8 t/m³ and 0% compaction, log a
/// warning and return an `UNKNOWN_MATERIAL` audit warning.
pub fn resolve_material(name: &str) -> MaterialLookup {
    match Material::parse(name) {
        Some(material) => MaterialLookup {
            material: Some(material),
            properties: material.properties(),
            warning: None,
        },
        None => {
            warn!(material = %name, "Unknown material, using default density and compaction");
            MaterialLookup {
                material: None,
                properties: UNKNOWN_MATERIAL_PROPERTIES,
                warning: Some(AuditWarning {
                    code: UNKNOWN_MATERIAL_WARNING.to_string(),
                    message: format!(
                        "Unknown material '{}': using density {} t/m³ and {}% compaction",
                        name,
                        UNKNOWN_MATERIAL_PROPERTIES.density,
                        UNKNOWN_MATERIAL_PROPERTIES.compaction_pct
                    ),
                    severity: "low".to_string(),
                }),
            }
        }
    }
}

/// Density in t/m³ for a material name; unknown names read as 1.8.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::density;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(density("Asphalt"), Decimal::from_str("2.4").unwrap());
/// assert_eq!(density("mystery spoil"), Decimal::from_str("1.8").unwrap());
/// ```
pub fn density(name: &str) -> Decimal {
    Material::parse(name)
        .map(|m| m.properties())
        .unwrap_or(UNKNOWN_MATERIAL_PROPERTIES)
        .density
}

/// Compaction percentage for a material name; unknown names read as 0.
pub fn compaction_factor_pct(name: &str) -> Decimal {
    Material::parse(name)
        .map(|m| m.properties())
        .unwrap_or(UNKNOWN_MATERIAL_PROPERTIES)
        .compaction_pct
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_mat_001_table_values() {
        let asphalt = Material::Asphalt.properties();
        assert_eq!(asphalt.density, dec("2.4"));
        assert_eq!(asphalt.compaction_pct, dec("25"));
        assert_eq!(asphalt.truck_capacity, dec("8.5"));

        let base = Material::RoadBase.properties();
        assert_eq!(base.density, dec("2.2"));
        assert_eq!(base.compaction_pct, dec("20"));
        assert_eq!(base.truck_capacity, dec("11.5"));

        assert_eq!(Material::Rock.properties().compaction_pct, dec("50"));
        assert_eq!(Material::Topsoil.properties().density, dec("1.4"));
    }

    #[test]
    fn test_mat_002_name_matching_is_loose() {
        assert_eq!(Material::parse("ROAD-BASE"), Some(Material::RoadBase));
        assert_eq!(Material::parse("clean fill"), Some(Material::CleanFill));
        assert_eq!(Material::parse(" Top Soil "), Some(Material::Topsoil));
        assert_eq!(Material::parse("asphalt"), Some(Material::Asphalt));
    }

    #[test]
    fn test_mat_003_every_name_parses_back() {
        for material in Material::ALL {
            assert_eq!(Material::parse(material.name()), Some(material));
        }
    }

    #[test]
    fn test_mat_004_unknown_material_defaults_with_warning() {
        let lookup = resolve_material("Moon Dust");
        assert!(lookup.material.is_none());
        assert_eq!(lookup.properties.density, dec("1.8"));
        assert_eq!(lookup.properties.compaction_pct, Decimal::ZERO);
        assert_eq!(lookup.properties.truck_capacity, dec("10"));

        let warning = lookup.warning.unwrap();
        assert_eq!(warning.code, UNKNOWN_MATERIAL_WARNING);
        assert!(warning.message.contains("Moon Dust"));
    }

    #[test]
    fn test_mat_005_known_material_has_no_warning() {
        let lookup = resolve_material("Sand");
        assert_eq!(lookup.material, Some(Material::Sand));
        assert!(lookup.warning.is_none());
    }

    #[test]
    fn test_mat_006_total_lookup_functions() {
        assert_eq!(density("Concrete"), dec("2.4"));
        assert_eq!(compaction_factor_pct("Concrete"), dec("40"));
        assert_eq!(density(""), dec("1.8"));
        assert_eq!(compaction_factor_pct("??"), Decimal::ZERO);
    }
}
