use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: interest rate must not be negative, got {rate}")]
    NegativeRate {
        rate: Decimal
    },
    #[error("Config error: period length must be at least one day")]
    EmptyPeriod,
    #[error("Config error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Parse(#[from] serde_json::Error)
}
