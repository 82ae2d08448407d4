//! Withholding tax calculation.
//!
//! Tax is progressive: the matched bracket contributes its base amount plus
//! its marginal rate applied to the income in excess of the bracket's lower
//! bound.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::bracket_table::BracketTable;
use super::rounding::round_currency;

/// The statutory reference for the withholding tax table.
pub const WITHHOLDING_TAX_REF: &str = "RA 10963";

/// The result of a withholding tax calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct WithholdingTaxResult {
    /// The tax due, rounded to 2 dp.
    pub tax: Decimal,
    /// Position of the matched bracket in the table.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates withholding tax on a taxable income.
///
/// `tax = base_amount + rate * (taxable_income - lower_bound)` for the
/// bracket containing `taxable_income`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `taxable_income` is negative.
/// Callers deriving taxable income from gross salary clamp it at zero first.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_withholding_tax;
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::philippines_2023().unwrap();
/// let result = calculate_withholding_tax(
///     Decimal::from_str("40000").unwrap(),
///     config.withholding_tax(),
///     1,
/// )
/// .unwrap();
/// // 1,875.00 + 20% of (40,000 - 33,332)
/// assert_eq!(result.tax, Decimal::from_str("3208.60").unwrap());
/// ```
pub fn calculate_withholding_tax(
    taxable_income: Decimal,
    table: &BracketTable,
    step_number: u32,
) -> EngineResult<WithholdingTaxResult> {
    if taxable_income < Decimal::ZERO {
        return Err(EngineError::negative("taxable_income"));
    }

    let matched = table.lookup(taxable_income);
    let tax = round_currency(matched.evaluate(taxable_income));

    let reasoning = if matched.row.rate.is_zero() {
        format!(
            "Taxable income ${} falls in bracket {}: flat tax ${}",
            taxable_income, matched.index, tax
        )
    } else {
        format!(
            "Taxable income ${} falls in bracket {}: ${} + {} x (${} - ${}) = ${}",
            taxable_income,
            matched.index,
            matched.row.base_amount,
            matched.row.rate.normalize(),
            taxable_income,
            matched.lower_bound,
            tax
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "withholding_tax".to_string(),
        rule_name: "Withholding Tax".to_string(),
        statutory_ref: WITHHOLDING_TAX_REF.to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.to_string()
        }),
        output: serde_json::json!({
            "tax": tax.to_string(),
            "bracket_index": matched.index,
            "base_amount": matched.row.base_amount.to_string(),
            "rate": matched.row.rate.normalize().to_string(),
            "lower_bound": matched.lower_bound.to_string()
        }),
        reasoning,
    };

    Ok(WithholdingTaxResult {
        tax,
        bracket_index: matched.index,
        audit_step,
    })
}
