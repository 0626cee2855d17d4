
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::analysis::{
    payment_pattern, payment_windows, summarize_account, summarize_vehicles, AccountSummary,
    PaymentPattern, TimeWindow, VehicleSummary, WindowSummary
};
use crate::interest::{accrue, accrue_to_latest, InterestConfig, InterestSchedule};
use crate::ledger::{AccountLedger, BalancePoint, DailySummary};
use crate::models::ValidationError;
use crate::types::{AccountId, ConfigError};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError)
}

/// Everything the reporting layer needs for one account, computed in one
/// pass from the immutable ledger: statement, daily rollup, interest
/// schedule and the analysis blocks.
#[derive(Debug, Clone)]
pub struct AccountReport {
    pub account_id: AccountId,
    pub summary: AccountSummary,
    pub balance_points: Vec<BalancePoint>,
    pub daily_summaries: Vec<DailySummary>,
    pub schedule: InterestSchedule,
    pub vehicles: Vec<VehicleSummary>,
    pub monthly_windows: Vec<WindowSummary>,
    pub half_month_windows: Vec<WindowSummary>,
    pub pattern: PaymentPattern
}

impl AccountReport {
    /// Computes the full report. With no `as_of` the interest accrual runs
    /// through the ledger's last transaction date.
    ///
    /// # Errors
    /// Propagates `ValidationError` from aggregation and `ConfigError` from
    /// the interest configuration; a failed account never produces a
    /// partial report.
    pub fn build(ledger: &AccountLedger, config: &InterestConfig, as_of: Option<NaiveDate>) -> Result<Self, ReportError> {
        let statement = ledger.statement()?;

        let schedule = match as_of {
            Some(date) => accrue(&statement, config, date)?,
            None => accrue_to_latest(&statement, config)?
        };

        Ok(Self {
            account_id: ledger.account_id,
            summary: summarize_account(&statement),
            balance_points: statement.points().to_vec(),
            daily_summaries: statement.daily_summaries(),
            schedule,
            vehicles: summarize_vehicles(ledger.transactions()),
            monthly_windows: payment_windows(ledger.transactions(), TimeWindow::Monthly),
            half_month_windows: payment_windows(ledger.transactions(), TimeWindow::HalfMonthly),
            pattern: payment_pattern(&statement)
        })
    }

    pub fn accrued_interest(&self) -> Decimal {
        self.schedule.total_accrued
    }

    pub fn closing_balance(&self) -> Decimal {
        self.summary.closing_balance
    }
}
