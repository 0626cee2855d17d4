use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Transaction, ValidationError};
use crate::types::AccountId;

/// One row of an account statement: the signed movement applied on `date`
/// and the running balance after it.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub delta: Decimal,
    pub balance: Decimal
}

/// Per-date rollup of a statement: total charges and payments booked on the
/// date and the balance after the last of them.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub charges: Decimal,
    pub payments: Decimal,
    pub closing_balance: Decimal
}

/// The ordered balance history of one account.
///
/// Built from that account's transactions in any order: the builder sorts
/// by date (stable, so same-day records keep their input order) and folds
/// the running balance. A positive balance is the amount the customer owes.
#[derive(Debug, Clone)]
pub struct Statement {
    account_id: AccountId,
    points: Vec<BalancePoint>
}

impl Statement {
    /// Aggregates `transactions` into a date-ordered balance history.
    ///
    /// # Errors
    /// Returns `ValidationError::MixedAccounts` if any transaction belongs
    /// to a different account than `account_id`.
    pub fn build(account_id: AccountId, transactions: &[Transaction]) -> Result<Self, ValidationError> {
        for transaction in transactions {
            if transaction.account_id != account_id {
                return Err(ValidationError::mixed_accounts(account_id, transaction.account_id));
            }
        }

        let mut ordered: Vec<&Transaction> = transactions.iter().collect();
        ordered.sort_by_key(|transaction| transaction.date);

        let mut points = Vec::with_capacity(ordered.len());
        let mut balance = Decimal::ZERO;

        for transaction in ordered {
            let delta = transaction.signed_amount();
            balance += delta;

            points.push(BalancePoint {
                date: transaction.date,
                delta,
                balance
            });
        }

        Ok(Self { account_id, points })
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn points(&self) -> &[BalancePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Balance after the first transaction, zero for an empty statement.
    pub fn opening_balance(&self) -> Decimal {
        self.points.first().map_or(Decimal::ZERO, |point| point.balance)
    }

    /// Balance after the last transaction, zero for an empty statement.
    pub fn closing_balance(&self) -> Decimal {
        self.points.last().map_or(Decimal::ZERO, |point| point.balance)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|point| point.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|point| point.date)
    }

    /// Groups the statement by calendar date. Points are already ordered,
    /// so each date forms one contiguous run.
    pub fn daily_summaries(&self) -> Vec<DailySummary> {
        let mut summaries: Vec<DailySummary> = Vec::new();

        for point in &self.points {
            if !summaries.last().is_some_and(|summary| summary.date == point.date) {
                summaries.push(DailySummary {
                    date: point.date,
                    charges: Decimal::ZERO,
                    payments: Decimal::ZERO,
                    closing_balance: point.balance
                });
            }

            if let Some(summary) = summaries.last_mut() {
                if point.delta >= Decimal::ZERO {
                    summary.charges += point.delta;
                } else {
                    summary.payments -= point.delta;
                }

                summary.closing_balance = point.balance;
            }
        }

        summaries
    }
}
