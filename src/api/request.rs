//! Request types for the estimator API.
//!
//! This module defines the JSON request structure for the `/estimate` endpoint.
//! Every section is optional; numeric fields accept numbers or numeric strings.

use serde::{Deserialize, Serialize};

use crate::models::{
    AsphaltLayer, Consumables, Emulsion, EquipmentUnits, ExcavationEquipment, ExcavationItem,
    ImportMaterial, LaborModel, LaborRole, LegacyLabor, Oncosts, OtherLaborItem, ProjectInput,
    ProjectSettings, TrafficControl,
};

/// Request body for the `/estimate` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRequest {
    /// The asphalt surface layer.
    pub asphalt: AsphaltLayer,
    /// Imported materials.
    pub import_materials: Vec<ImportMaterial>,
    /// Excavation line items.
    pub excavation_items: Vec<ExcavationItem>,
    /// The legacy single-crew block with oncosts.
    pub labor_legacy: LegacyLaborRequest,
    /// Crew roles; when non-empty the legacy crew is ignored.
    pub labor_roles: Vec<LaborRole>,
    /// Additional labor.
    pub other_labor_items: Vec<OtherLaborItem>,
    /// Owned plant units.
    pub equipment_units: EquipmentUnits,
    /// Machines excavation items can reference.
    pub excavation_equipment: Vec<ExcavationEquipment>,
    /// Paint and fuel.
    pub consumables: Consumables,
    /// Traffic management.
    pub traffic_control: TrafficControl,
    /// Tack coat.
    pub emulsion: Emulsion,
    /// Quote settings.
    pub project: ProjectSettings,
}

/// The `laborLegacy` section: the legacy crew plus the oncost percentages
/// that apply to every labor line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyLaborRequest {
    /// Crew size, hours, duration, rate and penalty flags.
    #[serde(flatten)]
    pub crew: LegacyLabor,
    /// Superannuation, workers' compensation and other oncosts.
    #[serde(flatten)]
    pub oncosts: Oncosts,
}

impl From<EstimateRequest> for ProjectInput {
    fn from(req: EstimateRequest) -> Self {
        ProjectInput {
            asphalt: req.asphalt,
            import_materials: req.import_materials,
            excavation_items: req.excavation_items,
            labor: LaborModel::from_sections(req.labor_legacy.crew, req.labor_roles),
            oncosts: req.labor_legacy.oncosts,
            other_labor_items: req.other_labor_items,
            equipment_units: req.equipment_units,
            excavation_equipment: req.excavation_equipment,
            consumables: req.consumables,
            traffic_control: req.traffic_control,
            emulsion: req.emulsion,
            project: req.project,
        }
    }
}
