//! Employee model and related types.
//!
//! This module defines the Employee record and the fixed monthly allowances
//! it carries. The payroll core reads only the salary and allowance fields;
//! identity fields travel along for reporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Represents the employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Regular (permanent) employment.
    Regular,
    /// Probationary employment.
    Probationary,
}

/// The fixed monthly allowances paid on top of salary.
///
/// Allowances are not subject to statutory deductions; they are added to the
/// net salary verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Allowances {
    /// Monthly rice subsidy.
    pub rice_subsidy: Decimal,
    /// Monthly phone allowance.
    pub phone_allowance: Decimal,
    /// Monthly clothing allowance.
    pub clothing_allowance: Decimal,
}

impl Allowances {
    /// Returns the sum of all three allowances.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if the sum overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Allowances;
    /// use rust_decimal::Decimal;
    ///
    /// let allowances = Allowances {
    ///     rice_subsidy: Decimal::new(1500, 0),
    ///     phone_allowance: Decimal::new(2000, 0),
    ///     clothing_allowance: Decimal::new(1000, 0),
    /// };
    /// assert_eq!(allowances.total().unwrap(), Decimal::new(4500, 0));
    /// ```
    pub fn total(&self) -> EngineResult<Decimal> {
        self.rice_subsidy
            .checked_add(self.phone_allowance)
            .and_then(|sum| sum.checked_add(self.clothing_allowance))
            .ok_or_else(|| EngineError::CalculationError {
                message: "allowance total overflows".to_string(),
            })
    }
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique employee number.
    pub employee_number: String,
    /// The employee's last name.
    pub last_name: String,
    /// The employee's first name.
    pub first_name: String,
    /// Job position title.
    #[serde(default)]
    pub position: String,
    /// The employment status.
    pub employment_status: EmploymentStatus,
    /// The basic monthly salary.
    pub basic_salary: Decimal,
    /// Monthly rice subsidy.
    pub rice_subsidy: Decimal,
    /// Monthly phone allowance.
    pub phone_allowance: Decimal,
    /// Monthly clothing allowance.
    pub clothing_allowance: Decimal,
}

impl Employee {
    /// Returns the employee's name as "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the employee's allowances as a single value.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{Employee, EmploymentStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     employee_number: "10001".to_string(),
    ///     last_name: "Garcia".to_string(),
    ///     first_name: "Manuel".to_string(),
    ///     position: "Chief Executive Officer".to_string(),
    ///     employment_status: EmploymentStatus::Regular,
    ///     basic_salary: Decimal::new(90000, 0),
    ///     rice_subsidy: Decimal::new(1500, 0),
    ///     phone_allowance: Decimal::new(2000, 0),
    ///     clothing_allowance: Decimal::new(1000, 0),
    /// };
    /// assert_eq!(employee.allowances().total().unwrap(), Decimal::new(4500, 0));
    /// ```
    pub fn allowances(&self) -> Allowances {
        Allowances {
            rice_subsidy: self.rice_subsidy,
            phone_allowance: self.phone_allowance,
            clothing_allowance: self.clothing_allowance,
        }
    }
}
