//! Request types for the Payroll Engine API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::PayrollRequest;

/// Request body for the `/deductions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsRequest {
    /// The gross salary to compute deductions for.
    pub gross_salary: Decimal,
}

/// Request body for the `/payroll` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollBatchRequest {
    /// The employees to run payroll for, with their hours worked.
    pub employees: Vec<PayrollRequest>,
}
