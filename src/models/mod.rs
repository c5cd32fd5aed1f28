//! Core data models for the paving estimator.
//!
//! This module contains the project input document, its line items, and the
//! cost result document produced by the engine.

mod cost_result;
mod excavation;
mod labor;
mod numeric;
mod project;

pub use cost_result::{
    AsphaltCost, AuditStep, AuditTrace, AuditWarning, ConsumablesCost, CostResult,
    DepreciationLine, EmulsionCost, EquipmentDepreciation, ExcavationCosts, ExcavationItemCost,
    ImportMaterialCost, LaborCost, LaborLine, LaborSource, MaterialCosts, OtherLaborCost,
    OtherLaborLine, PenaltyRule, PerSquareMeter, QuantityBreakdown, TrafficControlCost,
    ValidationIssue, ValidationKind,
};
pub use excavation::{DisposalType, ExcavationEquipment, ExcavationItem, ImportMaterial};
pub use labor::{
    LaborModel, LaborRole, LegacyLabor, Oncosts, OtherLaborItem, PenaltyFlags, PricingMethod,
};
pub use numeric::{
    coerce_decimal, lenient_bool, lenient_count, lenient_decimal, lenient_optional_decimal,
    lenient_optional_string, parse_number_prefix,
};
pub use project::{
    AsphaltLayer, Complexity, Consumable, Consumables, DEFAULT_TAX_RATE_PCT, Emulsion,
    EquipmentKind, EquipmentUnits, ProjectInput, ProjectSettings, TrafficControl,
};

pub(crate) use numeric::positive;
