//! Calculation logic for the asphalt estimator.
//!
//! This module contains the section calculators (material quantities,
//! asphalt, tack coat, imported materials, excavation and disposal, crew
//! labor with penalty rules, additional labor, equipment depreciation,
//! consumables and traffic management), the quote pipeline, and
//! [`estimate`], which runs them all for one project.

mod arithmetic;
mod consumables;
mod depreciation;
mod emulsion;
mod estimate;
mod excavation;
mod import_materials;
mod labor;
mod materials;
mod other_labor;
mod quantity;
mod quote;
mod traffic_control;

pub use consumables::{ConsumablesResult, calculate_consumables};
pub use depreciation::{DepreciationResult, calculate_depreciation};
pub use emulsion::{EmulsionResult, calculate_emulsion};
pub use estimate::{estimate, sum_sections};
pub use excavation::{
    EXCAVATION_ITEMS_SECTION, ExcavationResult, UNKNOWN_EQUIPMENT_WARNING, calculate_excavation,
    disposal_route,
};
pub use import_materials::{
    IMPORT_MATERIALS_SECTION, ImportMaterialsResult, calculate_import_materials,
};
pub use labor::{
    LEGACY_CREW_ROLE, LaborResult, PENALTY_PRIORITY, RulePredicate, WorkPattern, calculate_labor,
    select_penalty_rule,
};
pub use materials::{
    Material, MaterialLookup, MaterialProperties, UNKNOWN_MATERIAL_PROPERTIES,
    UNKNOWN_MATERIAL_WARNING, compaction_factor_pct, density, resolve_material,
};
pub use other_labor::{OtherLaborResult, calculate_other_labor};
pub use quantity::{
    AsphaltResult, ItemQuantity, QuantitySource, calculate_asphalt, calculate_item_quantity,
    calculate_quantity,
};
pub use quote::{QuoteResult, calculate_quote};
pub use traffic_control::{
    TrafficControlResult, UNKNOWN_TRAFFIC_ITEM_WARNING, calculate_traffic_control,
};
