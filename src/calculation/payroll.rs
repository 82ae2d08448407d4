//! Payroll orchestration.
//!
//! Derives the hourly rate and the hours-prorated gross salary from an
//! employee's basic salary, feeds that prorated gross (not the basic salary)
//! into the deduction tables, and adds the fixed allowances to arrive at the
//! net salary.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Allowances, AuditStep, AuditTrace, Employee, PayrollCalculation, PayrollResult,
};

use super::deductions::{DeductionsResult, compute_deductions};
use super::rounding::{round_currency, round_rate};

/// Computes gross and net salary for one pay period.
///
/// # Arguments
///
/// * `basic_salary` - The basic monthly salary
/// * `hours_worked` - Hours actually worked in the period
/// * `allowances` - Fixed allowances, added verbatim to net salary
/// * `config` - The contribution schedule
///
/// # Errors
///
/// - [`EngineError::InvalidArgument`] if the salary, hours, or any allowance is negative
/// - [`EngineError::CalculationError`] if deductions exceed gross salary plus
///   allowances, or an intermediate amount overflows
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Allowances;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PayrollConfig::philippines_2023().unwrap();
/// let result = compute_payroll(
///     Decimal::from_str("20000").unwrap(),
///     Decimal::from_str("168").unwrap(),
///     &Allowances::default(),
///     &config,
/// )
/// .unwrap();
///
/// assert_eq!(result.hourly_rate, Decimal::from_str("119.0476").unwrap());
/// assert_eq!(result.gross_salary, Decimal::from_str("20000.00").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("18700.00").unwrap());
/// ```
pub fn compute_payroll(
    basic_salary: Decimal,
    hours_worked: Decimal,
    allowances: &Allowances,
    config: &PayrollConfig,
) -> EngineResult<PayrollResult> {
    payroll_with_audit(basic_salary, hours_worked, allowances, config)
        .map(|breakdown| breakdown.result)
}

/// Computes payroll for an employee and wraps it with an audit trace.
///
/// # Errors
///
/// Same as [`compute_payroll`].
pub fn calculate_employee_payroll(
    employee: &Employee,
    hours_worked: Decimal,
    config: &PayrollConfig,
) -> EngineResult<PayrollCalculation> {
    let start_time = Instant::now();

    let breakdown = payroll_with_audit(
        employee.basic_salary,
        hours_worked,
        &employee.allowances(),
        config,
    )?;

    debug!(
        employee_id = %employee.employee_number,
        employment_status = ?employee.employment_status,
        gross_salary = %breakdown.result.gross_salary,
        total_deductions = %breakdown.result.total_deductions,
        net_salary = %breakdown.result.net_salary,
        "Payroll computed"
    );

    Ok(PayrollCalculation {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.employee_number.clone(),
        hours_worked,
        taxable_income: breakdown.deductions.taxable_income,
        deductions: breakdown.deductions.deductions,
        result: breakdown.result,
        audit_trace: AuditTrace {
            steps: breakdown.audit_steps,
            warnings: breakdown.deductions.warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}

struct PayrollBreakdown {
    result: PayrollResult,
    deductions: DeductionsResult,
    audit_steps: Vec<AuditStep>,
}

fn payroll_with_audit(
    basic_salary: Decimal,
    hours_worked: Decimal,
    allowances: &Allowances,
    config: &PayrollConfig,
) -> EngineResult<PayrollBreakdown> {
    if basic_salary < Decimal::ZERO {
        return Err(EngineError::negative("basic_salary"));
    }
    if hours_worked < Decimal::ZERO {
        return Err(EngineError::negative("hours_worked"));
    }
    for (field, amount) in [
        ("rice_subsidy", allowances.rice_subsidy),
        ("phone_allowance", allowances.phone_allowance),
        ("clothing_allowance", allowances.clothing_allowance),
    ] {
        if amount < Decimal::ZERO {
            return Err(EngineError::negative(field));
        }
    }

    let standard_hours = config.standard_monthly_hours();
    let overflow = || EngineError::CalculationError {
        message: format!(
            "gross salary overflows for basic salary {} and {} hours",
            basic_salary, hours_worked
        ),
    };
    let hourly_rate = basic_salary
        .checked_div(standard_hours)
        .ok_or_else(overflow)?;
    // Multiply before dividing so 168 hours reproduces the basic salary exactly.
    let gross_salary = basic_salary
        .checked_mul(hours_worked)
        .and_then(|total| total.checked_div(standard_hours))
        .map(round_currency)
        .ok_or_else(overflow)?;

    let mut audit_steps = vec![AuditStep {
        step_number: 1,
        rule_id: "gross_salary".to_string(),
        rule_name: "Prorated Gross Salary".to_string(),
        statutory_ref: "company policy".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "hours_worked": hours_worked.to_string(),
            "standard_monthly_hours": standard_hours.to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": round_rate(hourly_rate).to_string(),
            "gross_salary": gross_salary.to_string()
        }),
        reasoning: format!(
            "${} / {} h = ${}/h; x {} h = ${}",
            basic_salary,
            standard_hours,
            round_rate(hourly_rate),
            hours_worked,
            gross_salary
        ),
    }];

    let deductions = compute_deductions(gross_salary, config, 2)?;
    audit_steps.extend(deductions.audit_steps.iter().cloned());

    let total_deductions = deductions.deductions.total();
    let total_allowances = allowances.total()?;
    let net_salary = gross_salary
        .checked_sub(total_deductions)
        .and_then(|net| net.checked_add(total_allowances))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "net salary overflows for gross salary ${} plus allowances ${}",
                gross_salary, total_allowances
            ),
        })?;

    if net_salary < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!(
                "deductions ${} exceed gross salary ${} plus allowances ${}",
                total_deductions, gross_salary, total_allowances
            ),
        });
    }

    audit_steps.push(AuditStep {
        step_number: audit_steps.len() as u32 + 1,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        statutory_ref: "company policy".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "total_deductions": total_deductions.to_string(),
            "total_allowances": total_allowances.to_string()
        }),
        output: serde_json::json!({
            "net_salary": net_salary.to_string()
        }),
        reasoning: format!(
            "${} - ${} + ${} = ${}",
            gross_salary, total_deductions, total_allowances, net_salary
        ),
    });

    Ok(PayrollBreakdown {
        result: PayrollResult {
            hourly_rate: round_rate(hourly_rate),
            gross_salary,
            total_allowances,
            total_deductions,
            net_salary,
        },
        deductions,
        audit_steps,
    })
}
