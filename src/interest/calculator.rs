use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::ledger::Statement;
use crate::types::{AccountId, ConfigError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compounding {
    Simple,
    Compound
}

/// Accrual parameters.
///
/// `rate` is a decimal fraction per period (0.02 = 2% per period), not an
/// annual percentage. `grace_days` is the overdue threshold: days after the
/// first transaction date before a positive balance starts accruing.
#[derive(Debug, Clone)]
pub struct InterestConfig {
    pub rate: Decimal,
    pub compounding: Compounding,
    pub period_length_days: u32,
    pub grace_days: u32
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            rate: dec!(0.01),
            compounding: Compounding::Simple,
            period_length_days: 30,
            grace_days: 0
        }
    }
}

impl InterestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rate < Decimal::ZERO {
            return Err(ConfigError::NegativeRate { rate: self.rate });
        }

        if self.period_length_days == 0 {
            return Err(ConfigError::EmptyPeriod);
        }

        Ok(())
    }
}

/// Interest accrued over one fixed-length window of an account's history.
/// `end_date` is the last day the window covers, inclusive;
/// `outstanding_balance` is the ledger balance at that day's close.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestPeriod {
    pub account_id: AccountId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub outstanding_balance: Decimal,
    pub rate: Decimal,
    pub accrued_interest: Decimal
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterestSchedule {
    pub periods: Vec<InterestPeriod>,
    pub total_accrued: Decimal
}

impl InterestSchedule {
    pub fn empty() -> Self {
        Self {
            periods: Vec::new(),
            total_accrued: Decimal::ZERO
        }
    }
}

/// Accrues interest on a statement's outstanding balance through `as_of`.
///
/// The calendar from the first transaction date through `as_of` is split
/// into fixed windows of `period_length_days`. Each day whose balance is
/// positive and past the grace window adds that balance to the running
/// period's day-weighted sum; at period close the period accrues
/// `sum / period_length_days * rate`, rounded half-up to two decimals.
/// The trailing partial window is closed at `as_of`, which prorates it
/// linearly by elapsed days. Under the compound policy each period's
/// rounded accrual is capitalized into the principal base of the periods
/// that follow.
///
/// Transactions take effect on their own date, so the balance used for a
/// day is the running ledger balance after that day's movements. Days with
/// a zero or negative balance contribute nothing, which also covers a
/// balance crossing zero mid-period: only the positive sub-interval
/// accrues.
///
/// # Errors
/// Returns `ConfigError` if the rate is negative or the period length is
/// zero. An empty statement, or an `as_of` before the first transaction,
/// yields an empty schedule.
pub fn accrue(statement: &Statement, config: &InterestConfig, as_of: NaiveDate) -> Result<InterestSchedule, ConfigError> {
    config.validate()?;

    let Some(first) = statement.first_date() else {
        return Ok(InterestSchedule::empty());
    };

    if as_of < first {
        return Ok(InterestSchedule::empty());
    }

    let mut movements: HashMap<NaiveDate, Decimal> = HashMap::new();

    for point in statement.points() {
        *movements.entry(point.date).or_insert(Decimal::ZERO) += point.delta;
    }

    let period_length = Decimal::from(config.period_length_days);
    let overdue_start = first.checked_add_days(Days::new(u64::from(config.grace_days)));

    let mut periods = Vec::new();
    let mut total_accrued = Decimal::ZERO;
    let mut balance = Decimal::ZERO;
    let mut capitalized = Decimal::ZERO;
    let mut basis_sum = Decimal::ZERO;
    let mut period_start = first;
    let mut day = first;
    let mut day_index: u32 = 0;

    loop {
        if let Some(delta) = movements.get(&day) {
            balance += *delta;
        }

        let overdue = overdue_start.is_some_and(|start| day >= start);
        let basis = balance + capitalized;

        if overdue && basis > Decimal::ZERO {
            basis_sum += basis;
        }

        let period_closes = (day_index + 1) % config.period_length_days == 0;
        let last_day = day == as_of;

        if period_closes || last_day {
            let accrued_interest = (basis_sum / period_length * config.rate)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

            periods.push(InterestPeriod {
                account_id: statement.account_id(),
                start_date: period_start,
                end_date: day,
                outstanding_balance: balance,
                rate: config.rate,
                accrued_interest
            });

            total_accrued += accrued_interest;

            if config.compounding == Compounding::Compound {
                capitalized += accrued_interest;
            }

            basis_sum = Decimal::ZERO;

            if let Some(next) = day.succ_opt() {
                period_start = next;
            }
        }

        if last_day {
            break;
        }

        let Some(next) = day.succ_opt() else {
            break;
        };

        day = next;
        day_index += 1;
    }

    Ok(InterestSchedule { periods, total_accrued })
}

/// Accrues through the statement's last transaction date.
pub fn accrue_to_latest(statement: &Statement, config: &InterestConfig) -> Result<InterestSchedule, ConfigError> {
    match statement.last_date() {
        Some(last) => accrue(statement, config, last),
        None => {
            config.validate()?;
            Ok(InterestSchedule::empty())
        }
    }
}
