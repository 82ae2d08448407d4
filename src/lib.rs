//! Payroll Engine for Philippine statutory deductions
//!
//! This crate computes social insurance, health insurance, housing fund and
//! withholding tax deductions from tiered tables, and derives gross and net
//! salary from an employee's basic salary and hours worked.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
