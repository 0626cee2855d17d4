mod account;
mod aggregator;

pub use account::AccountLedger;
pub use aggregator::{BalancePoint, DailySummary, Statement};
