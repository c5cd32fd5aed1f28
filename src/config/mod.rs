//! Rate configuration for the paving estimator.
//!
//! This module loads the rate tables the calculators read (penalty
//! multipliers, depreciation schedules, traffic control prices, pricing constants)
//! from YAML files, and provides the same values built-in through
//! [`EstimatorConfig::standard`].
//!
//! # Example
//!
//! ```no_run
//! use asphalt_estimator::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded rates: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ComplexityMultipliers, DepreciationConfig, DepreciationSchedule, EstimatorConfig,
    EstimatorMetadata, FlatBundle, LaborRates, PenaltyMultipliers, PriceList, PricingRates,
    TrafficControlRates,
};
