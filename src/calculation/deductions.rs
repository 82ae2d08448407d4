//! Statutory deduction aggregation.
//!
//! Combines the four calculators for one gross salary. The three
//! contributions are computed independently from gross salary; withholding
//! tax is then computed on what remains after them. That ordering changes the
//! tax due and must not be rearranged.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, AuditWarning, DeductionSet};

use super::health_insurance::calculate_health_insurance;
use super::housing_fund::calculate_housing_fund;
use super::rounding::is_whole_centavos;
use super::social_insurance::calculate_social_insurance;
use super::withholding_tax::calculate_withholding_tax;

/// Warning code raised when contributions exceed gross salary.
pub const TAXABLE_INCOME_CLAMPED: &str = "TAXABLE_INCOME_CLAMPED";

/// The aggregated deductions for one gross salary.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The four deductions.
    pub deductions: DeductionSet,
    /// Gross salary less the three contributions, floored at zero.
    pub taxable_income: Decimal,
    /// One audit step per calculator, in evaluation order.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while aggregating.
    pub warnings: Vec<AuditWarning>,
}

/// Computes all statutory deductions for a gross salary.
///
/// Audit steps are numbered from `first_step`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `gross_salary` is negative or
/// carries a fraction of a centavo.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_deductions;
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::philippines_2023().unwrap();
/// let result = compute_deductions(Decimal::from_str("20000").unwrap(), &config, 1).unwrap();
///
/// assert_eq!(result.deductions.social_insurance, Decimal::from_str("900.00").unwrap());
/// assert_eq!(result.deductions.health_insurance, Decimal::from_str("300.00").unwrap());
/// assert_eq!(result.deductions.housing_fund, Decimal::from_str("100.00").unwrap());
/// assert_eq!(result.taxable_income, Decimal::from_str("18700.00").unwrap());
/// assert_eq!(result.deductions.withholding_tax, Decimal::ZERO);
/// ```
pub fn compute_deductions(
    gross_salary: Decimal,
    config: &PayrollConfig,
    first_step: u32,
) -> EngineResult<DeductionsResult> {
    if gross_salary < Decimal::ZERO {
        return Err(EngineError::negative("gross_salary"));
    }
    if !is_whole_centavos(gross_salary) {
        return Err(EngineError::sub_centavo("gross_salary"));
    }

    let social_insurance =
        calculate_social_insurance(gross_salary, config.social_insurance(), first_step)?;
    let health_insurance =
        calculate_health_insurance(gross_salary, config.health_insurance(), first_step + 1)?;
    let housing_fund = calculate_housing_fund(gross_salary, config.housing_fund(), first_step + 2)?;

    let contributions =
        social_insurance.contribution + health_insurance.contribution + housing_fund.contribution;

    let mut warnings = Vec::new();
    let taxable_income = if contributions > gross_salary {
        warnings.push(AuditWarning {
            code: TAXABLE_INCOME_CLAMPED.to_string(),
            message: format!(
                "Contributions ${} exceed gross salary ${}; taxable income set to $0.00",
                contributions, gross_salary
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    } else {
        gross_salary - contributions
    };

    let withholding_tax =
        calculate_withholding_tax(taxable_income, config.withholding_tax(), first_step + 3)?;

    let deductions = DeductionSet {
        social_insurance: social_insurance.contribution,
        health_insurance: health_insurance.contribution,
        housing_fund: housing_fund.contribution,
        withholding_tax: withholding_tax.tax,
    };

    Ok(DeductionsResult {
        deductions,
        taxable_income,
        audit_steps: vec![
            social_insurance.audit_step,
            health_insurance.audit_step,
            housing_fund.audit_step,
            withholding_tax.audit_step,
        ],
        warnings,
    })
}
