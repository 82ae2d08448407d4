//! Batch payroll processing.
//!
//! Each record is computed independently. A record that fails is reported
//! in [`BatchOutcome::failures`] and does not stop the rest of the batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::PayrollConfig;
use crate::models::{Employee, PayrollCalculation};

use super::payroll::calculate_employee_payroll;

/// One employee and the hours they worked in the period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee record.
    pub employee: Employee,
    /// Hours worked in the period.
    pub hours_worked: Decimal,
}

/// A record that could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Position of the record in the batch.
    pub index: usize,
    /// The employee number of the failed record.
    pub employee_id: String,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// The outcome of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successful calculations, in input order.
    pub results: Vec<PayrollCalculation>,
    /// Failed records, in input order.
    pub failures: Vec<BatchFailure>,
}

/// Computes payroll for every request, isolating per-record failures.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{PayrollRequest, process_batch};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Employee, EmploymentStatus};
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::philippines_2023().unwrap();
/// let employee = Employee {
///     employee_number: "10001".to_string(),
///     last_name: "Garcia".to_string(),
///     first_name: "Manuel".to_string(),
///     position: String::new(),
///     employment_status: EmploymentStatus::Regular,
///     basic_salary: Decimal::new(20000, 0),
///     rice_subsidy: Decimal::ZERO,
///     phone_allowance: Decimal::ZERO,
///     clothing_allowance: Decimal::ZERO,
/// };
/// let requests = vec![
///     PayrollRequest { employee: employee.clone(), hours_worked: Decimal::new(168, 0) },
///     PayrollRequest { employee, hours_worked: Decimal::new(-1, 0) },
/// ];
///
/// let outcome = process_batch(&requests, &config);
/// assert_eq!(outcome.results.len(), 1);
/// assert_eq!(outcome.failures.len(), 1);
/// assert_eq!(outcome.failures[0].code, "INVALID_ARGUMENT");
/// ```
pub fn process_batch(requests: &[PayrollRequest], config: &PayrollConfig) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, request) in requests.iter().enumerate() {
        match calculate_employee_payroll(&request.employee, request.hours_worked, config) {
            Ok(calculation) => outcome.results.push(calculation),
            Err(err) => {
                warn!(
                    index,
                    employee_id = %request.employee.employee_number,
                    employee_name = %request.employee.full_name(),
                    error = %err,
                    "Skipping payroll record"
                );
                outcome.failures.push(BatchFailure {
                    index,
                    employee_id: request.employee.employee_number.clone(),
                    code: err.code().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        processed = requests.len(),
        succeeded = outcome.results.len(),
        failed = outcome.failures.len(),
        "Payroll batch completed"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmploymentStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(id: &str, basic_salary: &str, hours: &str) -> PayrollRequest {
        PayrollRequest {
            employee: Employee {
                employee_number: id.to_string(),
                last_name: "Reyes".to_string(),
                first_name: "Isabella".to_string(),
                position: "Account Manager".to_string(),
                employment_status: EmploymentStatus::Regular,
                basic_salary: dec(basic_salary),
                rice_subsidy: dec("1500"),
                phone_allowance: dec("1000"),
                clothing_allowance: dec("1000"),
            },
            hours_worked: dec(hours),
        }
    }

    #[test]
    fn test_all_records_succeed() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let requests = vec![
            request("10001", "90000", "168"),
            request("10002", "60000", "160"),
        ];

        let outcome = process_batch(&requests, &config);
        assert_eq!(outcome.results.len(), 2);
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.results[0].employee_id, "10001");
        assert_eq!(outcome.results[1].employee_id, "10002");
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let requests = vec![
            request("10001", "90000", "168"),
            request("10002", "-60000", "160"),
            request("10003", "60000", "-1"),
            request("10004", "52670", "168"),
        ];

        let outcome = process_batch(&requests, &config);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].employee_id, "10001");
        assert_eq!(outcome.results[1].employee_id, "10004");

        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].employee_id, "10002");
        assert_eq!(outcome.failures[0].code, "INVALID_ARGUMENT");
        assert!(outcome.failures[0].message.contains("basic_salary"));
        assert_eq!(outcome.failures[1].index, 2);
        assert!(outcome.failures[1].message.contains("hours_worked"));
    }

    #[test]
    fn test_allowance_overflow_is_isolated() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let huge = Decimal::MAX / dec("2");
        let mut overflowing = request("10002", "60000", "168");
        overflowing.employee.rice_subsidy = huge;
        overflowing.employee.phone_allowance = huge;
        overflowing.employee.clothing_allowance = huge;
        let requests = vec![
            request("10001", "90000", "168"),
            overflowing,
            request("10003", "52670", "168"),
        ];

        let outcome = process_batch(&requests, &config);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].employee_id, "10001");
        assert_eq!(outcome.results[1].employee_id, "10003");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert_eq!(outcome.failures[0].code, "CALCULATION_ERROR");
    }

    #[test]
    fn test_empty_batch() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let outcome = process_batch(&[], &config);
        assert_eq!(outcome, BatchOutcome::default());
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let json = r#"{
            "employee": {
                "employee_number": "10005",
                "last_name": "Hernandez",
                "first_name": "Eduard",
                "employment_status": "regular",
                "basic_salary": "52670",
                "rice_subsidy": "1500",
                "phone_allowance": "1000",
                "clothing_allowance": "1000"
            },
            "hours_worked": "160.5"
        }"#;
        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.hours_worked, dec("160.5"));
        assert_eq!(request.employee.basic_salary, dec("52670"));
    }
}
