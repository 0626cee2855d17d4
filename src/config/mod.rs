
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::interest::{Compounding, InterestConfig};
use crate::types::ConfigError;

/// Engine settings, usually loaded from a JSON file next to the data.
///
/// Every field is defaulted so a partial file, or no file at all, works.
/// `rate` is per accrual period; `as_of` pins the accrual horizon and
/// falls back to each account's last transaction date when null.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rate: Decimal,
    pub compounding: Compounding,
    pub period_length_days: u32,
    pub grace_days: u32,
    pub as_of: Option<NaiveDate>
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rate: dec!(0.01),
            compounding: Compounding::Simple,
            period_length_days: 30,
            grace_days: 0,
            as_of: None
        }
    }
}

impl EngineConfig {
    /// Reads and validates a config file.
    ///
    /// # Errors
    /// Returns `ConfigError` for unreadable files, malformed JSON, a
    /// negative rate or a zero period length.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.interest().validate()
    }

    pub fn interest(&self) -> InterestConfig {
        InterestConfig {
            rate: self.rate,
            compounding: self.compounding,
            period_length_days: self.period_length_days,
            grace_days: self.grace_days
        }
    }
}
