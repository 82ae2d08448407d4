//! Calculation logic for the Payroll Engine.
//!
//! This module contains the bracket table lookup, the social insurance,
//! health insurance, housing fund and withholding tax calculators, the
//! deduction aggregator that sequences them, the payroll orchestrator that
//! derives gross and net salary, and batch processing.

mod batch;
mod bracket_table;
mod deductions;
mod health_insurance;
mod housing_fund;
mod payroll;
mod rounding;
mod social_insurance;
mod withholding_tax;

pub use batch::{BatchFailure, BatchOutcome, PayrollRequest, process_batch};
pub use bracket_table::{BracketMatch, BracketRow, BracketTable};
pub use deductions::{DeductionsResult, TAXABLE_INCOME_CLAMPED, compute_deductions};
pub use health_insurance::{HEALTH_INSURANCE_REF, HealthInsuranceResult, calculate_health_insurance};
pub use housing_fund::{HOUSING_FUND_REF, HousingFundResult, calculate_housing_fund};
pub use payroll::{calculate_employee_payroll, compute_payroll};
pub use rounding::{round_currency, round_rate};
pub use social_insurance::{
    SOCIAL_INSURANCE_REF, SocialInsuranceResult, calculate_social_insurance,
};
pub use withholding_tax::{WITHHOLDING_TAX_REF, WithholdingTaxResult, calculate_withholding_tax};
