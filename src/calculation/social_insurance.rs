//! Social insurance (SSS) contribution calculation.
//!
//! The contribution is a step function of gross salary: each salary bracket
//! maps to a flat amount, with no marginal rate in between.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::bracket_table::BracketTable;
use super::rounding::{is_whole_centavos, round_currency};

/// The statutory reference for social insurance contributions.
pub const SOCIAL_INSURANCE_REF: &str = "RA 11199";

/// The result of a social insurance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SocialInsuranceResult {
    /// The employee's contribution, rounded to 2 dp.
    pub contribution: Decimal,
    /// Position of the matched bracket in the table.
    pub bracket_index: usize,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Looks up the flat social insurance contribution for a gross salary.
///
/// Salaries below the first bracket bound pay the table minimum; salaries
/// above the last finite bound pay the catch-all maximum.
///
/// # Errors
///
/// Returns [`EngineError::InvalidArgument`] if `gross_salary` is negative or
/// carries a fraction of a centavo. Bracket bounds are stated to the centavo.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_social_insurance;
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::philippines_2023().unwrap();
/// let result = calculate_social_insurance(
///     Decimal::from_str("20000").unwrap(),
///     config.social_insurance(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.contribution, Decimal::from_str("900.00").unwrap());
/// ```
pub fn calculate_social_insurance(
    gross_salary: Decimal,
    table: &BracketTable,
    step_number: u32,
) -> EngineResult<SocialInsuranceResult> {
    if gross_salary < Decimal::ZERO {
        return Err(EngineError::negative("gross_salary"));
    }
    if !is_whole_centavos(gross_salary) {
        return Err(EngineError::sub_centavo("gross_salary"));
    }

    let matched = table.lookup(gross_salary);
    let contribution = round_currency(matched.row.base_amount);

    let range = match matched.row.upper_bound {
        Some(upper) if matched.index == 0 => format!("up to {}", upper),
        Some(upper) => format!("over {} up to {}", matched.lower_bound, upper),
        None => format!("over {}", matched.lower_bound),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "social_insurance".to_string(),
        rule_name: "Social Insurance Contribution".to_string(),
        statutory_ref: SOCIAL_INSURANCE_REF.to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string()
        }),
        output: serde_json::json!({
            "contribution": contribution.to_string(),
            "bracket_index": matched.index
        }),
        reasoning: format!(
            "Salary ${} falls in bracket {} ({}): flat contribution ${}",
            gross_salary, matched.index, range, contribution
        ),
    };

    Ok(SocialInsuranceResult {
        contribution,
        bracket_index: matched.index,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollConfig;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn contribution(salary: &str) -> Decimal {
        let config = PayrollConfig::philippines_2023().unwrap();
        calculate_social_insurance(dec(salary), config.social_insurance(), 1)
            .unwrap()
            .contribution
    }

    #[test]
    fn test_zero_salary_pays_minimum() {
        assert_eq!(contribution("0"), dec("180.00"));
    }

    #[test]
    fn test_below_first_bound_pays_minimum() {
        assert_eq!(contribution("4249.99"), dec("180.00"));
    }

    #[test]
    fn test_first_step_above_minimum() {
        assert_eq!(contribution("4250.00"), dec("202.50"));
        assert_eq!(contribution("4749.99"), dec("202.50"));
        assert_eq!(contribution("4750.00"), dec("225.00"));
    }

    #[test]
    fn test_mid_table_bracket() {
        // 19,750.00 - 20,249.99
        assert_eq!(contribution("20000"), dec("900.00"));
        assert_eq!(contribution("19750"), dec("900.00"));
        assert_eq!(contribution("20249.99"), dec("900.00"));
    }

    #[test]
    fn test_top_finite_bracket() {
        assert_eq!(contribution("29749.99"), dec("1327.50"));
    }

    #[test]
    fn test_catch_all_pays_maximum() {
        assert_eq!(contribution("29750"), dec("1350.00"));
        assert_eq!(contribution("90000"), dec("1350.00"));
    }

    #[test]
    fn test_constant_within_bracket() {
        assert_eq!(contribution("10250.00"), contribution("10749.99"));
    }

    #[test]
    fn test_negative_salary_rejected() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let result = calculate_social_insurance(dec("-0.01"), config.social_insurance(), 1);
        match result {
            Err(EngineError::InvalidArgument { field, .. }) => assert_eq!(field, "gross_salary"),
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_fraction_of_centavo_rejected_below_first_bound() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let result = calculate_social_insurance(dec("4249.995"), config.social_insurance(), 1);
        match result {
            Err(EngineError::InvalidArgument { field, message }) => {
                assert_eq!(field, "gross_salary");
                assert!(message.contains("centavos"));
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_zeros_are_whole_centavos() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let result =
            calculate_social_insurance(dec("4249.9900"), config.social_insurance(), 1).unwrap();
        assert_eq!(result.contribution, dec("180.00"));
    }

    #[test]
    fn test_audit_step_records_bracket() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let result = calculate_social_insurance(dec("20000"), config.social_insurance(), 3).unwrap();

        assert_eq!(result.bracket_index, 32);
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "social_insurance");
        assert_eq!(result.audit_step.statutory_ref, "RA 11199");
        assert_eq!(result.audit_step.output["contribution"], "900.00");
        assert_eq!(result.audit_step.output["bracket_index"], 32);
        assert!(result.audit_step.reasoning.contains("over 19749.99 up to 20249.99"));
    }

    #[test]
    fn test_audit_reasoning_for_catch_all() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let result = calculate_social_insurance(dec("50000"), config.social_insurance(), 1).unwrap();
        assert!(result.audit_step.reasoning.contains("over 29749.99"));
        assert!(result.audit_step.reasoning.contains("$1350.00"));
    }
}
