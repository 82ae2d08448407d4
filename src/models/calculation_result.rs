//! Calculation result models for the Payroll Engine.
//!
//! This module contains the [`DeductionSet`] and [`PayrollResult`] value
//! objects produced by the engine, the [`PayrollCalculation`] envelope that
//! bundles them for one employee, and the audit trace types recording every
//! rule application along the way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four statutory deductions computed for one gross salary.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionSet;
/// use rust_decimal::Decimal;
///
/// let deductions = DeductionSet {
///     social_insurance: Decimal::new(90000, 2),
///     health_insurance: Decimal::new(30000, 2),
///     housing_fund: Decimal::new(10000, 2),
///     withholding_tax: Decimal::ZERO,
/// };
/// assert_eq!(deductions.total(), Decimal::new(130000, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSet {
    /// Social insurance (SSS) employee contribution.
    pub social_insurance: Decimal,
    /// Health insurance (PhilHealth) employee share.
    pub health_insurance: Decimal,
    /// Housing fund (Pag-IBIG) contribution.
    pub housing_fund: Decimal,
    /// Withholding tax on the post-contribution taxable income.
    pub withholding_tax: Decimal,
}

impl DeductionSet {
    /// Returns the sum of the three non-tax contributions.
    pub fn contributions(&self) -> Decimal {
        self.social_insurance + self.health_insurance + self.housing_fund
    }

    /// Returns the sum of all four deductions.
    pub fn total(&self) -> Decimal {
        self.contributions() + self.withholding_tax
    }
}

/// The salary figures derived for one pay period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Basic salary divided by the standard monthly hours, rounded to 4 dp.
    pub hourly_rate: Decimal,
    /// Salary pro-rated by hours worked, rounded to 2 dp.
    pub gross_salary: Decimal,
    /// Sum of the employee's fixed allowances.
    pub total_allowances: Decimal,
    /// Sum of all statutory deductions.
    pub total_deductions: Decimal,
    /// Gross salary less deductions plus allowances.
    pub net_salary: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The statute or schedule the rule comes from.
    pub statutory_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete payroll calculation for one employee.
///
/// Derived per request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee number the calculation is for.
    pub employee_id: String,
    /// Hours worked in the period.
    pub hours_worked: Decimal,
    /// Gross salary less the three non-tax contributions, floored at zero.
    pub taxable_income: Decimal,
    /// The individual statutory deductions.
    pub deductions: DeductionSet,
    /// The derived salary figures.
    pub result: PayrollResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
