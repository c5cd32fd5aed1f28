//! Quantity calculation functionality.
//!
//! This module turns dimensions (or an explicit loose volume) into compacted
//! volume, loose volume, weight and truck loads, and prices the asphalt layer.
//!
//! ```text
//! compactedVolume = area × depth / 1000
//! looseVolume     = compactedVolume × (1 + compaction / 100)
//! weight          = looseVolume × density
//! ```

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AsphaltCost, AsphaltLayer, AuditStep, AuditWarning, QuantityBreakdown, positive,
};

use super::arithmetic::product;
use super::materials::{Material, resolve_material};

/// Where a line item's quantity comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantitySource {
    /// Area in m² and depth in mm.
    Dimensions {
        /// Area in m².
        area: Decimal,
        /// Depth in mm.
        depth: Decimal,
    },
    /// Loose volume in m³, supplied directly.
    Volume(Decimal),
}

impl QuantitySource {
    /// Picks the quantity source for a line item.
    ///
    /// An explicit volume greater than zero wins; otherwise both area and
    /// depth must be greater than zero. Returns `None` when neither holds.
    ///
    /// # Example
    ///
    /// ```
    /// use asphalt_estimator::calculation::QuantitySource;
    /// use rust_decimal::Decimal;
    ///
    /// let volume = Some(Decimal::from(3));
    /// let source = QuantitySource::from_inputs(Decimal::from(10), Decimal::ZERO, volume);
    /// assert_eq!(source, Some(QuantitySource::Volume(Decimal::from(3))));
    ///
    /// assert_eq!(QuantitySource::from_inputs(Decimal::from(10), Decimal::ZERO, None), None);
    /// ```
    pub fn from_inputs(area: Decimal, depth: Decimal, volume: Option<Decimal>) -> Option<Self> {
        if let Some(volume) = positive(volume) {
            return Some(QuantitySource::Volume(volume));
        }
        if area > Decimal::ZERO && depth > Decimal::ZERO {
            return Some(QuantitySource::Dimensions { area, depth });
        }
        None
    }
}

/// Calculates volumes, weight and truck loads.
///
/// * `density` - t/m³
/// * `compaction_pct` - bulking percentage between in-place and loose volume
/// * `truck_capacity` - tonnes per truck load
///
/// When the volume is supplied directly and the compaction factor is zero
/// (a compaction of -100%), the compacted volume reads as zero.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when a volume or the
/// weight leaves the decimal range.
pub fn calculate_quantity(
    source: QuantitySource,
    density: Decimal,
    compaction_pct: Decimal,
    truck_capacity: Decimal,
) -> EngineResult<QuantityBreakdown> {
    let factor = Decimal::ONE + compaction_pct / Decimal::ONE_HUNDRED;

    let (compacted_volume, loose_volume) = match source {
        QuantitySource::Dimensions { area, depth } => {
            let compacted = product("compacted volume", &[area, depth])? / Decimal::ONE_THOUSAND;
            (compacted, product("loose volume", &[compacted, factor])?)
        }
        QuantitySource::Volume(volume) => (
            volume.checked_div(factor).unwrap_or(Decimal::ZERO),
            volume,
        ),
    };

    let weight = product("weight", &[loose_volume, density])?;
    let truck_loads = weight
        .checked_div(truck_capacity)
        .unwrap_or(Decimal::ZERO)
        .round_dp(2);

    Ok(QuantityBreakdown {
        compacted_volume,
        loose_volume,
        weight,
        density,
        compaction_pct,
        truck_loads,
    })
}

/// A line item's quantity after material resolution.
#[derive(Debug, Clone)]
pub struct ItemQuantity {
    /// Quantities, or `None` when the item has no usable dimensions or volume.
    pub quantity: Option<QuantityBreakdown>,
    /// Raised when the material name was not in the table.
    pub warning: Option<AuditWarning>,
}

/// Resolves a line item's material and calculates its quantity.
///
/// * `density_kg_m3` - item density; overrides the table when greater than zero
/// * `compaction_pct` - item compaction; overrides the table when present
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] as [`calculate_quantity`] does.
pub fn calculate_item_quantity(
    material: &str,
    area: Decimal,
    depth: Decimal,
    volume: Option<Decimal>,
    density_kg_m3: Option<Decimal>,
    compaction_pct: Option<Decimal>,
) -> EngineResult<ItemQuantity> {
    let Some(source) = QuantitySource::from_inputs(area, depth, volume) else {
        return Ok(ItemQuantity {
            quantity: None,
            warning: None,
        });
    };

    let lookup = resolve_material(material);
    let density = positive(density_kg_m3)
        .map(|kg| kg / Decimal::ONE_THOUSAND)
        .unwrap_or(lookup.properties.density);
    let compaction = compaction_pct.unwrap_or(lookup.properties.compaction_pct);

    Ok(ItemQuantity {
        quantity: Some(calculate_quantity(
            source,
            density,
            compaction,
            lookup.properties.truck_capacity,
        )?),
        warning: lookup.warning,
    })
}

/// The result of pricing the asphalt layer.
#[derive(Debug, Clone)]
pub struct AsphaltResult {
    /// Quantities and supply cost.
    pub cost: AsphaltCost,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the asphalt layer's quantity and supply cost.
///
/// Density falls back to the asphalt table density when zero; compaction is
/// always the asphalt table value. A layer with no area or depth yields
/// zero quantities.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Overflow`] when the weight or cost
/// leaves the decimal range.
///
/// # Example
///
/// ```
/// use asphalt_estimator::calculation::calculate_asphalt;
/// use asphalt_estimator::models::AsphaltLayer;
/// use rust_decimal::Decimal;
///
/// let layer = AsphaltLayer {
///     area: Decimal::from(100),
///     depth: Decimal::from(50),
///     density: Decimal::from(2400),
///     cost_per_tonne: Decimal::from(180),
/// };
/// let result = calculate_asphalt(&layer, 1).unwrap();
/// assert_eq!(result.cost.quantity.weight, Decimal::from(15));
/// assert_eq!(result.cost.cost, Decimal::from(2700));
/// ```
pub fn calculate_asphalt(layer: &AsphaltLayer, step_number: u32) -> EngineResult<AsphaltResult> {
    let table = Material::Asphalt.properties();
    let density = positive(Some(layer.density))
        .map(|kg| kg / Decimal::ONE_THOUSAND)
        .unwrap_or(table.density);

    let quantity = calculate_quantity(
        QuantitySource::Dimensions {
            area: layer.area,
            depth: layer.depth,
        },
        density,
        table.compaction_pct,
        table.truck_capacity,
    )?;
    let cost = product("asphalt cost", &[quantity.weight, layer.cost_per_tonne])?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "asphalt_quantity".to_string(),
        rule_name: "Asphalt Layer Quantity".to_string(),
        input: serde_json::json!({
            "area": layer.area.normalize().to_string(),
            "depth_mm": layer.depth.normalize().to_string(),
            "density_kg_m3": layer.density.normalize().to_string(),
            "cost_per_tonne": layer.cost_per_tonne.normalize().to_string()
        }),
        output: serde_json::json!({
            "compacted_volume": quantity.compacted_volume.normalize().to_string(),
            "loose_volume": quantity.loose_volume.normalize().to_string(),
            "weight": quantity.weight.normalize().to_string(),
            "truck_loads": quantity.truck_loads.normalize().to_string(),
            "cost": cost.normalize().to_string()
        }),
        reasoning: format!(
            "Asphalt: {} m² × {} mm × {}% compaction × {} t/m³ = {} t × ${} = ${}",
            layer.area.normalize(),
            layer.depth.normalize(),
            table.compaction_pct.normalize(),
            density.normalize(),
            quantity.weight.normalize(),
            layer.cost_per_tonne.normalize(),
            cost.normalize()
        ),
    };

    Ok(AsphaltResult {
        cost: AsphaltCost {
            quantity,
            cost_per_tonne: layer.cost_per_tonne,
            cost,
        },
        audit_step,
    })
}
