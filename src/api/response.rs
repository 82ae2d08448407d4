//! Response types for the Payroll Engine API.
//!
//! This module defines the success and error response structures for the
//! HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DeductionsResult;
use crate::error::EngineError;
use crate::models::{AuditStep, AuditWarning, DeductionSet};

/// Response body for the `/deductions` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsResponse {
    /// The gross salary the deductions were computed for.
    pub gross_salary: Decimal,
    /// Gross salary less the three contributions, floored at zero.
    pub taxable_income: Decimal,
    /// The individual deductions.
    pub deductions: DeductionSet,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Audit steps, one per calculator.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised during aggregation.
    pub warnings: Vec<AuditWarning>,
}

impl DeductionsResponse {
    /// Builds the response from an aggregation result.
    pub fn new(gross_salary: Decimal, result: DeductionsResult) -> Self {
        Self {
            gross_salary,
            taxable_income: result.taxable_income,
            total_deductions: result.deductions.total(),
            deductions: result.deductions,
            audit_steps: result.audit_steps,
            warnings: result.warnings,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let code = error.code();
        match error {
            EngineError::InvalidArgument { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    code,
                    format!("Invalid argument '{}': {}", field, message),
                    "The request contains an out-of-range amount",
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(code, "Calculation failed", message),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(code, "Configuration error", other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_argument_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::negative("gross_salary").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_ARGUMENT");
        assert!(api_error.error.message.contains("gross_salary"));
    }

    #[test]
    fn test_calculation_error_maps_to_unprocessable() {
        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "deductions exceed pay".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(api_error.error.details.as_deref(), Some("deductions exceed pay"));
    }

    #[test]
    fn test_configuration_error_maps_to_server_error() {
        let api_error: ApiErrorResponse = EngineError::ConfigurationError {
            message: "bracket table is empty".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }
}
