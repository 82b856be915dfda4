//! HTTP API module for the share sacrifice model.
//!
//! This module provides the REST API endpoints for computing yearly value
//! tables and comparing reduction tiers.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ScenarioRequest, YearlyValueRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::{AppState, SharedLookup};
