//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, DeductionSet, PayrollCalculation, PayrollResult,
};
pub use employee::{Allowances, Employee, EmploymentStatus};
