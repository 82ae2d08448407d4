//! Health insurance (PhilHealth) contribution calculation.
//!
//! The premium is a flat percentage of gross salary shared equally between
//! employer and employee; this module computes the employee's half.

use rust_decimal::Decimal;

use crate::config::HealthInsuranceRates;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::rounding::round_currency;

/// The statutory reference for health insurance contributions.
pub const HEALTH_INSURANCE_REF: &str = "RA 11223";

/// The result of a health insurance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HealthInsuranceResult {
    /// The employee's half of the premium, rounded to 2 dp.
    pub contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employee share of the health insurance premium.
///
/// `contribution = gross_salary * rate / 2`. No ceiling is applied.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `gross_salary` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_health_insurance;
/// use payroll_engine::config::HealthInsuranceRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = HealthInsuranceRates { rate: Decimal::from_str("0.03").unwrap() };
/// let result = calculate_health_insurance(Decimal::from_str("20000").unwrap(), &rates, 1).unwrap();
/// assert_eq!(result.contribution, Decimal::from_str("300.00").unwrap());
/// ```
pub fn calculate_health_insurance(
    gross_salary: Decimal,
    rates: &HealthInsuranceRates,
    step_number: u32,
) -> EngineResult<HealthInsuranceResult> {
    if gross_salary < Decimal::ZERO {
        return Err(EngineError::negative("gross_salary"));
    }

    let premium = gross_salary * rates.rate;
    let contribution = round_currency(premium / Decimal::TWO);

    let audit_step = AuditStep {
        step_number,
        rule_id: "health_insurance".to_string(),
        rule_name: "Health Insurance Contribution".to_string(),
        statutory_ref: HEALTH_INSURANCE_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "rate": rates.rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "contribution": contribution.to_string()
        }),
        reasoning: format!(
            "${} x {} / 2 = ${}",
            gross_salary,
            rates.rate.normalize(),
            contribution
        ),
    };

    Ok(HealthInsuranceResult {
        contribution,
        audit_step,
    })
}
