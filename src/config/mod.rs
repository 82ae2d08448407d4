//! Configuration loading and management for the Payroll Engine.
//!
//! This module loads contribution schedules from YAML files: schedule
//! metadata, health insurance and housing fund rates, and the social
//! insurance and withholding tax bracket tables.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/ph2023").unwrap();
//! println!("Loaded schedule: {}", loader.config().metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BracketTableFile, ContributionsFile, HealthInsuranceRates, HousingFundRates, PayrollConfig,
    ScheduleFile, ScheduleMetadata,
};
