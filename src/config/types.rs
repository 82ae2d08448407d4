//! Configuration types for payroll computation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`PayrollConfig`] they are assembled into.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{BracketRow, BracketTable};
use crate::error::{EngineError, EngineResult};

/// Metadata about the contribution schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Human-readable name of the schedule.
    pub name: String,
    /// Jurisdiction code (e.g., "PH").
    pub jurisdiction: String,
    /// The date the schedule takes effect.
    pub effective_date: NaiveDate,
}

/// Structure of `schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    /// Human-readable name of the schedule.
    pub name: String,
    /// Jurisdiction code (e.g., "PH").
    pub jurisdiction: String,
    /// The date the schedule takes effect.
    pub effective_date: NaiveDate,
    /// Working hours in a standard month, used to derive the hourly rate.
    pub standard_monthly_hours: Decimal,
}

impl ScheduleFile {
    /// Splits the file into its metadata and the standard monthly hours.
    pub fn into_parts(self) -> (ScheduleMetadata, Decimal) {
        let metadata = ScheduleMetadata {
            name: self.name,
            jurisdiction: self.jurisdiction,
            effective_date: self.effective_date,
        };
        (metadata, self.standard_monthly_hours)
    }
}

/// Health insurance contribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInsuranceRates {
    /// Total premium rate, split evenly between employer and employee.
    pub rate: Decimal,
}

/// Housing fund contribution parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingFundRates {
    /// Contribution rate applied to gross salary.
    pub rate: Decimal,
    /// Maximum monthly contribution.
    pub cap: Decimal,
}

/// Structure of `contributions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionsFile {
    /// Health insurance parameters.
    pub health_insurance: HealthInsuranceRates,
    /// Housing fund parameters.
    pub housing_fund: HousingFundRates,
}

/// Structure of a bracket table file (`social_insurance.yaml`, `withholding_tax.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BracketTableFile {
    /// Rows ordered by upper bound, catch-all last.
    pub brackets: Vec<BracketRow>,
}

/// The complete, validated payroll configuration.
///
/// Constructed once and read-only afterwards; safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollConfig {
    metadata: ScheduleMetadata,
    standard_monthly_hours: Decimal,
    social_insurance: BracketTable,
    health_insurance: HealthInsuranceRates,
    housing_fund: HousingFundRates,
    withholding_tax: BracketTable,
}

impl PayrollConfig {
    /// Assembles a configuration, validating the parts that bracket tables
    /// do not validate themselves.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if:
    /// - `standard_monthly_hours` is not positive
    /// - the social insurance table has a non-zero rate (it must be a step function)
    /// - a contribution rate is outside `[0, 1]` or the housing fund cap is negative
    pub fn new(
        metadata: ScheduleMetadata,
        standard_monthly_hours: Decimal,
        social_insurance: BracketTable,
        health_insurance: HealthInsuranceRates,
        housing_fund: HousingFundRates,
        withholding_tax: BracketTable,
    ) -> EngineResult<Self> {
        if standard_monthly_hours <= Decimal::ZERO {
            return Err(EngineError::ConfigurationError {
                message: format!(
                    "standard_monthly_hours must be positive, got {}",
                    standard_monthly_hours
                ),
            });
        }
        if !social_insurance.is_flat() {
            return Err(EngineError::ConfigurationError {
                message: "social insurance table must use flat amounts (rate 0)".to_string(),
            });
        }
        check_rate("health_insurance.rate", health_insurance.rate)?;
        check_rate("housing_fund.rate", housing_fund.rate)?;
        if housing_fund.cap < Decimal::ZERO {
            return Err(EngineError::ConfigurationError {
                message: format!("housing_fund.cap must not be negative, got {}", housing_fund.cap),
            });
        }

        Ok(Self {
            metadata,
            standard_monthly_hours,
            social_insurance,
            health_insurance,
            housing_fund,
            withholding_tax,
        })
    }

    /// Builds the 2023 Philippine schedule without reading any files.
    ///
    /// - Social insurance: employee share of 4.5% of the monthly salary
    ///   credit, 180.00 below 4,250 rising 22.50 per 500 to 1,350.00 from 29,750.
    /// - Health insurance: 3% premium, employee pays half.
    /// - Housing fund: 2%, capped at 100.00.
    /// - Withholding tax: monthly TRAIN law table, tax-free up to 20,832.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::PayrollConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = PayrollConfig::philippines_2023().unwrap();
    /// assert_eq!(config.standard_monthly_hours(), Decimal::new(168, 0));
    /// assert_eq!(config.social_insurance().len(), 53);
    /// ```
    pub fn philippines_2023() -> EngineResult<Self> {
        let metadata = ScheduleMetadata {
            name: "Philippine statutory deductions 2023".to_string(),
            jurisdiction: "PH".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).ok_or_else(|| {
                EngineError::ConfigurationError {
                    message: "invalid effective date".to_string(),
                }
            })?,
        };

        Self::new(
            metadata,
            Decimal::new(168, 0),
            BracketTable::new(social_insurance_2023_rows())?,
            HealthInsuranceRates {
                rate: Decimal::new(3, 2),
            },
            HousingFundRates {
                rate: Decimal::new(2, 2),
                cap: Decimal::new(10000, 2),
            },
            BracketTable::new(withholding_tax_2023_rows())?,
        )
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the working hours in a standard month.
    pub fn standard_monthly_hours(&self) -> Decimal {
        self.standard_monthly_hours
    }

    /// Returns the social insurance table.
    pub fn social_insurance(&self) -> &BracketTable {
        &self.social_insurance
    }

    /// Returns the health insurance parameters.
    pub fn health_insurance(&self) -> &HealthInsuranceRates {
        &self.health_insurance
    }

    /// Returns the housing fund parameters.
    pub fn housing_fund(&self) -> &HousingFundRates {
        &self.housing_fund
    }

    /// Returns the withholding tax table.
    pub fn withholding_tax(&self) -> &BracketTable {
        &self.withholding_tax
    }

    /// Returns a copy with different health insurance parameters.
    pub fn with_health_insurance(self, health_insurance: HealthInsuranceRates) -> EngineResult<Self> {
        check_rate("health_insurance.rate", health_insurance.rate)?;
        Ok(Self {
            health_insurance,
            ..self
        })
    }

    /// Returns a copy with different housing fund parameters.
    pub fn with_housing_fund(self, housing_fund: HousingFundRates) -> EngineResult<Self> {
        Self::new(
            self.metadata,
            self.standard_monthly_hours,
            self.social_insurance,
            self.health_insurance,
            housing_fund,
            self.withholding_tax,
        )
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::ConfigurationError {
            message: format!("{} must be within [0, 1], got {}", field, rate),
        });
    }
    Ok(())
}

/// Social insurance rows: 180.00 up to 4,249.99, then +22.50 every 500 up to
/// 29,749.99, and 1,350.00 above that.
fn social_insurance_2023_rows() -> Vec<BracketRow> {
    let first_bound = Decimal::new(424999, 2);
    let step = Decimal::new(500, 0);
    let minimum = Decimal::new(18000, 2);
    let increment = Decimal::new(2250, 2);

    let mut rows: Vec<BracketRow> = (0..52u32)
        .map(|tier| {
            let tier = Decimal::from(tier);
            BracketRow::bounded(
                first_bound + step * tier,
                minimum + increment * tier,
                Decimal::ZERO,
            )
        })
        .collect();
    rows.push(BracketRow::catch_all(Decimal::new(135000, 2), Decimal::ZERO));
    rows
}

/// Monthly withholding tax rows under the TRAIN law.
fn withholding_tax_2023_rows() -> Vec<BracketRow> {
    vec![
        BracketRow::bounded(Decimal::new(20832, 0), Decimal::ZERO, Decimal::ZERO),
        BracketRow::bounded(Decimal::new(33332, 0), Decimal::ZERO, Decimal::new(15, 2)),
        BracketRow::bounded(
            Decimal::new(66666, 0),
            Decimal::new(187500, 2),
            Decimal::new(20, 2),
        ),
        BracketRow::bounded(
            Decimal::new(166666, 0),
            Decimal::new(854180, 2),
            Decimal::new(25, 2),
        ),
        BracketRow::bounded(
            Decimal::new(666666, 0),
            Decimal::new(3354180, 2),
            Decimal::new(30, 2),
        ),
        BracketRow::catch_all(Decimal::new(18354180, 2), Decimal::new(35, 2)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn metadata() -> ScheduleMetadata {
        ScheduleMetadata {
            name: "test".to_string(),
            jurisdiction: "PH".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    fn flat_table() -> BracketTable {
        BracketTable::new(vec![BracketRow::catch_all(dec("100"), Decimal::ZERO)]).unwrap()
    }

    fn build(hours: &str, social_insurance: BracketTable, health_rate: &str) -> EngineResult<PayrollConfig> {
        PayrollConfig::new(
            metadata(),
            dec(hours),
            social_insurance,
            HealthInsuranceRates {
                rate: dec(health_rate),
            },
            HousingFundRates {
                rate: dec("0.02"),
                cap: dec("100"),
            },
            flat_table(),
        )
    }

    #[test]
    fn test_builtin_schedule_is_valid() {
        let config = PayrollConfig::philippines_2023().unwrap();
        assert_eq!(config.metadata().jurisdiction, "PH");
        assert_eq!(config.health_insurance().rate, dec("0.03"));
        assert_eq!(config.housing_fund().rate, dec("0.02"));
        assert_eq!(config.housing_fund().cap, dec("100.00"));
        assert_eq!(config.withholding_tax().len(), 6);
    }

    #[test]
    fn test_builtin_social_insurance_endpoints() {
        let config = PayrollConfig::philippines_2023().unwrap();
        let rows = config.social_insurance().rows();
        assert_eq!(rows[0].upper_bound, Some(dec("4249.99")));
        assert_eq!(rows[0].base_amount, dec("180.00"));
        assert_eq!(rows[51].upper_bound, Some(dec("29749.99")));
        assert_eq!(rows[51].base_amount, dec("1327.50"));
        assert_eq!(rows[52].upper_bound, None);
        assert_eq!(rows[52].base_amount, dec("1350.00"));
    }

    #[test]
    fn test_zero_standard_hours_rejected() {
        let result = build("0", flat_table(), "0.03");
        assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
    }

    #[test]
    fn test_marginal_social_insurance_table_rejected() {
        let table = BracketTable::new(vec![BracketRow::catch_all(dec("0"), dec("0.045"))]).unwrap();
        let result = build("168", table, "0.03");
        assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
    }

    #[test]
    fn test_rate_above_one_rejected() {
        let result = build("168", flat_table(), "3");
        match result {
            Err(EngineError::ConfigurationError { message }) => {
                assert!(message.contains("health_insurance.rate"));
            }
            other => panic!("Expected ConfigurationError, got {:?}", other),
        }
    }

    #[test]
    fn test_with_housing_fund_overrides_rate() {
        let config = PayrollConfig::philippines_2023()
            .unwrap()
            .with_housing_fund(HousingFundRates {
                rate: dec("0.03"),
                cap: dec("100"),
            })
            .unwrap();
        assert_eq!(config.housing_fund().rate, dec("0.03"));
    }

    #[test]
    fn test_with_housing_fund_rejects_negative_cap() {
        let result = PayrollConfig::philippines_2023()
            .unwrap()
            .with_housing_fund(HousingFundRates {
                rate: dec("0.02"),
                cap: dec("-1"),
            });
        assert!(matches!(result, Err(EngineError::ConfigurationError { .. })));
    }

    #[test]
    fn test_with_health_insurance_overrides_rate() {
        let config = PayrollConfig::philippines_2023()
            .unwrap()
            .with_health_insurance(HealthInsuranceRates { rate: dec("0.05") })
            .unwrap();
        assert_eq!(config.health_insurance().rate, dec("0.05"));
    }
}
