//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rate
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::EquipmentKind;

use super::types::{
    DepreciationConfig, EstimatorConfig, EstimatorMetadata, LaborRates, PricingRates,
    TrafficControlRates,
};

/// Loads and provides access to the estimator's rate configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── estimator.yaml        # Rate set metadata
/// ├── labor.yaml            # Penalty multipliers and ordinary hours
/// ├── equipment.yaml        # Depreciation schedules
/// ├── traffic_control.yaml  # Complexity, equipment, permit and weather rates
/// └── pricing.yaml          # Emulsion wastage and subcontractor GST
/// ```
///
/// # Example
///
/// ```no_run
/// use asphalt_estimator::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("Loaded rates: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EstimatorConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The depreciation table does not cover every equipment kind
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EstimatorMetadata>(&path.join("estimator.yaml"))?;
        let labor = Self::load_yaml::<LaborRates>(&path.join("labor.yaml"))?;

        let equipment_path = path.join("equipment.yaml");
        let depreciation = Self::load_yaml::<DepreciationConfig>(&equipment_path)?;
        Self::check_depreciation(&depreciation, &equipment_path)?;

        let traffic_control =
            Self::load_yaml::<TrafficControlRates>(&path.join("traffic_control.yaml"))?;
        let pricing = Self::load_yaml::<PricingRates>(&path.join("pricing.yaml"))?;

        let config = EstimatorConfig::new(metadata, labor, depreciation, traffic_control, pricing);
        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn check_depreciation(depreciation: &DepreciationConfig, path: &Path) -> EngineResult<()> {
        let missing: Vec<String> = EquipmentKind::ALL
            .iter()
            .filter(|kind| depreciation.schedule(**kind).is_none())
            .map(|kind| kind.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: format!("missing depreciation schedules: {}", missing.join(", ")),
            })
        }
    }

    /// Returns the underlying rate configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns the rate set metadata.
    pub fn metadata(&self) -> &EstimatorMetadata {
        self.config.metadata()
    }
}
