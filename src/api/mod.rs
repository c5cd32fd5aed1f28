//! HTTP API module for the asphalt estimator.
//!
//! This module provides the REST endpoint that prices a project document.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EstimateRequest, LegacyLaborRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
