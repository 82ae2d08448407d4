//! Housing fund (Pag-IBIG) contribution calculation.

use rust_decimal::Decimal;

use crate::config::HousingFundRates;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::rounding::round_currency;

/// The statutory reference for housing fund contributions.
pub const HOUSING_FUND_REF: &str = "RA 9679";

/// The result of a housing fund calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HousingFundResult {
    /// The contribution after applying the cap, rounded to 2 dp.
    pub contribution: Decimal,
    /// Whether the cap limited the contribution.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the housing fund contribution as `min(gross_salary * rate, cap)`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `gross_salary` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_housing_fund;
/// use payroll_engine::config::HousingFundRates;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = HousingFundRates {
///     rate: Decimal::from_str("0.02").unwrap(),
///     cap: Decimal::from_str("100").unwrap(),
/// };
/// let result = calculate_housing_fund(Decimal::from_str("3000").unwrap(), &rates, 1).unwrap();
/// assert_eq!(result.contribution, Decimal::from_str("60.00").unwrap());
/// assert!(!result.capped);
/// ```
pub fn calculate_housing_fund(
    gross_salary: Decimal,
    rates: &HousingFundRates,
    step_number: u32,
) -> EngineResult<HousingFundResult> {
    if gross_salary < Decimal::ZERO {
        return Err(EngineError::negative("gross_salary"));
    }

    let uncapped = gross_salary * rates.rate;
    let capped = uncapped > rates.cap;
    let contribution = round_currency(uncapped.min(rates.cap));

    let reasoning = if capped {
        format!(
            "${} x {} = ${}, capped at ${}",
            gross_salary,
            rates.rate.normalize(),
            uncapped.normalize(),
            contribution
        )
    } else {
        format!(
            "${} x {} = ${}",
            gross_salary,
            rates.rate.normalize(),
            contribution
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_fund".to_string(),
        rule_name: "Housing Fund Contribution".to_string(),
        statutory_ref: HOUSING_FUND_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "rate": rates.rate.normalize().to_string(),
            "cap": rates.cap.to_string()
        }),
        output: serde_json::json!({
            "contribution": contribution.to_string(),
            "capped": capped
        }),
        reasoning,
    };

    Ok(HousingFundResult {
        contribution,
        capped,
        audit_step,
    })
}
