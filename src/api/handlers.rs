//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_deductions, process_batch};

use super::request::{DeductionsRequest, PayrollBatchRequest};
use super::response::{ApiError, ApiErrorResponse, DeductionsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/deductions", post(deductions_handler))
        .route("/payroll", post(payroll_handler))
        .route("/schedule", get(schedule_handler))
        .with_state(state)
}

/// Handler for POST /deductions endpoint.
///
/// Accepts a gross salary and returns the four statutory deductions.
async fn deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing deductions request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match compute_deductions(request.gross_salary, state.config(), 1) {
        Ok(result) => {
            let response = DeductionsResponse::new(request.gross_salary, result);
            info!(
                correlation_id = %correlation_id,
                gross_salary = %response.gross_salary,
                total_deductions = %response.total_deductions,
                duration_us = start_time.elapsed().as_micros(),
                "Deductions computed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Deductions calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for POST /payroll endpoint.
///
/// Runs payroll for every employee in the batch. Per-record failures are
/// reported in the body, so a well-formed batch always returns 200.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollBatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll batch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let outcome = process_batch(&request.employees, state.config());
    info!(
        correlation_id = %correlation_id,
        succeeded = outcome.results.len(),
        failed = outcome.failures.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll batch completed"
    );

    json_response(StatusCode::OK, outcome)
}

/// Handler for GET /schedule endpoint.
///
/// Returns the contribution schedule the engine was started with.
async fn schedule_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config())
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::BatchOutcome;
    use crate::config::ConfigLoader;
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/ph2023").expect("Failed to load config");
        AppState::new(config)
    }

    async fn post_json(uri: &str, body: impl Into<Body>) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> axum::body::Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_deductions_valid_request_returns_200() {
        let response = post_json("/deductions", r#"{ "gross_salary": "20000" }"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: DeductionsResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(result.deductions.social_insurance, dec("900.00"));
        assert_eq!(result.deductions.health_insurance, dec("300.00"));
        assert_eq!(result.deductions.housing_fund, dec("100.00"));
        assert_eq!(result.deductions.withholding_tax, dec("0"));
        assert_eq!(result.total_deductions, dec("1300.00"));
        assert_eq!(result.audit_steps.len(), 4);
    }

    #[tokio::test]
    async fn test_deductions_negative_salary_returns_400() {
        let response = post_json("/deductions", r#"{ "gross_salary": "-1" }"#).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_deductions_malformed_json_returns_400() {
        let response = post_json("/deductions", "{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_deductions_missing_field_returns_validation_error() {
        let response = post_json("/deductions", "{}").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("gross_salary"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/deductions")
                    .body(Body::from(r#"{ "gross_salary": "20000" }"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_payroll_batch_reports_partial_failures() {
        let body = r#"{
            "employees": [
                {
                    "employee": {
                        "employee_number": "10001",
                        "last_name": "Garcia",
                        "first_name": "Manuel III",
                        "employment_status": "regular",
                        "basic_salary": "90000",
                        "rice_subsidy": "1500",
                        "phone_allowance": "2000",
                        "clothing_allowance": "1000"
                    },
                    "hours_worked": "168"
                },
                {
                    "employee": {
                        "employee_number": "10002",
                        "last_name": "Lim",
                        "first_name": "Antonio",
                        "employment_status": "probationary",
                        "basic_salary": "60000",
                        "rice_subsidy": "0",
                        "phone_allowance": "0",
                        "clothing_allowance": "0"
                    },
                    "hours_worked": "-8"
                }
            ]
        }"#;

        let response = post_json("/payroll", body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let outcome: BatchOutcome = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].employee_id, "10001");
        assert_eq!(outcome.results[0].result.net_salary, dec("78024.70"));
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].employee_id, "10002");
        assert_eq!(outcome.failures[0].code, "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_payroll_missing_allowance_returns_validation_error() {
        let body = r#"{
            "employees": [
                {
                    "employee": {
                        "employee_number": "10003",
                        "last_name": "Aquino",
                        "first_name": "Bianca",
                        "employment_status": "regular",
                        "basic_salary": "60000",
                        "rice_subsidy": "1500",
                        "clothing_allowance": "1000"
                    },
                    "hours_worked": "168"
                }
            ]
        }"#;

        let response = post_json("/payroll", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("phone_allowance"));
    }

    #[tokio::test]
    async fn test_payroll_empty_batch_returns_empty_outcome() {
        let response = post_json("/payroll", r#"{ "employees": [] }"#).await;

        assert_eq!(response.status(), StatusCode::OK);
        let outcome: BatchOutcome = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(outcome.results.is_empty());
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_schedule_returns_loaded_configuration() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/schedule")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let schedule: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(schedule["metadata"]["jurisdiction"], "PH");
        assert_eq!(schedule["withholding_tax"]["rows"].as_array().unwrap().len(), 6);
        assert_eq!(schedule["social_insurance"]["rows"].as_array().unwrap().len(), 53);
    }
}
