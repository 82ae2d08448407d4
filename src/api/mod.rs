//! HTTP API module for the Payroll Engine.
//!
//! This module provides the REST API endpoints for computing statutory
//! deductions and running payroll batches.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DeductionsRequest, PayrollBatchRequest};
pub use response::{ApiError, ApiErrorResponse, DeductionsResponse};
pub use state::AppState;
