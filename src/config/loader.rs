//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading contribution
//! schedules from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::BracketTable;
use crate::error::{EngineError, EngineResult};

use super::types::{BracketTableFile, ContributionsFile, PayrollConfig, ScheduleFile};

/// Loads and provides access to a payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ph2023/
/// ├── schedule.yaml          # Schedule metadata and standard monthly hours
/// ├── contributions.yaml     # Health insurance and housing fund parameters
/// ├── social_insurance.yaml  # Flat-amount social insurance brackets
/// └── withholding_tax.yaml   # Progressive withholding tax brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ph2023").unwrap();
/// println!("Loaded schedule: {}", loader.config().metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/ph2023")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an unparseable number (`ConfigParseError`)
    /// - A bracket table or rate is malformed (`ConfigurationError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let schedule = Self::load_yaml::<ScheduleFile>(&path.join("schedule.yaml"))?;
        let contributions = Self::load_yaml::<ContributionsFile>(&path.join("contributions.yaml"))?;
        let social_insurance = Self::load_table(&path.join("social_insurance.yaml"))?;
        let withholding_tax = Self::load_table(&path.join("withholding_tax.yaml"))?;

        let (metadata, standard_monthly_hours) = schedule.into_parts();
        let config = PayrollConfig::new(
            metadata,
            standard_monthly_hours,
            social_insurance,
            contributions.health_insurance,
            contributions.housing_fund,
            withholding_tax,
        )?;

        debug!(
            schedule = %config.metadata().name,
            social_insurance_rows = config.social_insurance().len(),
            withholding_tax_rows = config.withholding_tax().len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps the built-in 2023 schedule.
    pub fn builtin() -> EngineResult<Self> {
        Ok(Self {
            config: PayrollConfig::philippines_2023()?,
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads a bracket table file and validates it.
    fn load_table(path: &Path) -> EngineResult<BracketTable> {
        let file = Self::load_yaml::<BracketTableFile>(path)?;
        BracketTable::new(file.brackets).map_err(|err| match err {
            EngineError::ConfigurationError { message } => EngineError::ConfigurationError {
                message: format!("{}: {}", path.display(), message),
            },
            other => other,
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
