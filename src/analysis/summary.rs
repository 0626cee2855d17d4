use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::ledger::Statement;
use crate::models::{Transaction, TransactionKind};
use crate::types::{AccountId, VehicleId};

/// Headline figures for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub transaction_count: usize,
    pub total_charges: Decimal,
    pub total_payments: Decimal,
    pub opening_balance: Decimal,
    pub closing_balance: Decimal
}

pub fn summarize_account(statement: &Statement) -> AccountSummary {
    let mut total_charges = Decimal::ZERO;
    let mut total_payments = Decimal::ZERO;

    for point in statement.points() {
        if point.delta >= Decimal::ZERO {
            total_charges += point.delta;
        } else {
            total_payments -= point.delta;
        }
    }

    AccountSummary {
        account_id: statement.account_id(),
        transaction_count: statement.points().len(),
        total_charges,
        total_payments,
        opening_balance: statement.opening_balance(),
        closing_balance: statement.closing_balance()
    }
}

/// Per-vehicle rollup of fuel drawn on credit, descending by total charged.
/// Payments carry no vehicle, so only charges count here.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleSummary {
    pub vehicle_id: VehicleId,
    pub transaction_count: usize,
    pub total_charged: Decimal,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate
}

pub fn summarize_vehicles(transactions: &[Transaction]) -> Vec<VehicleSummary> {
    let mut by_vehicle: BTreeMap<&VehicleId, VehicleSummary> = BTreeMap::new();

    for transaction in transactions {
        if transaction.kind != TransactionKind::Charge {
            continue;
        }

        let Some(vehicle_id) = transaction.vehicle_id.as_ref() else {
            continue;
        };

        by_vehicle
            .entry(vehicle_id)
            .and_modify(|summary| {
                summary.transaction_count += 1;
                summary.total_charged += transaction.amount;
                summary.first_date = summary.first_date.min(transaction.date);
                summary.last_date = summary.last_date.max(transaction.date);
            })
            .or_insert_with(|| VehicleSummary {
                vehicle_id: vehicle_id.clone(),
                transaction_count: 1,
                total_charged: transaction.amount,
                first_date: transaction.date,
                last_date: transaction.date
            });
    }

    let mut summaries: Vec<VehicleSummary> = by_vehicle.into_values().collect();
    summaries.sort_by(|left, right| {
        right.total_charged.cmp(&left.total_charged)
            .then_with(|| left.vehicle_id.cmp(&right.vehicle_id))
    });

    summaries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Monthly,
    /// Calendar month split on day 15.
    HalfMonthly
}

/// Charges and payments booked inside one calendar window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub charges: Decimal,
    pub payments: Decimal,
    pub net: Decimal
}

/// Buckets transactions into calendar windows, ascending by window start.
/// Windows without any transaction are not emitted.
pub fn payment_windows(transactions: &[Transaction], window: TimeWindow) -> Vec<WindowSummary> {
    let mut by_window: BTreeMap<NaiveDate, WindowSummary> = BTreeMap::new();

    for transaction in transactions {
        let (start_date, end_date) = window_bounds(transaction.date, window);

        let summary = by_window.entry(start_date).or_insert_with(|| WindowSummary {
            start_date,
            end_date,
            charges: Decimal::ZERO,
            payments: Decimal::ZERO,
            net: Decimal::ZERO
        });

        match transaction.kind {
            TransactionKind::Charge => summary.charges += transaction.amount,
            TransactionKind::Payment => summary.payments += transaction.amount
        }

        summary.net = summary.charges - summary.payments;
    }

    by_window.into_values().collect()
}

fn window_bounds(date: NaiveDate, window: TimeWindow) -> (NaiveDate, NaiveDate) {
    let month_start = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let month_end = month_start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);

    match window {
        TimeWindow::Monthly => (month_start, month_end),
        TimeWindow::HalfMonthly => {
            let mid = NaiveDate::from_ymd_opt(date.year(), date.month(), 15).unwrap_or(month_end);

            if date.day() <= 15 {
                (month_start, mid)
            } else {
                (mid.checked_add_days(Days::new(1)).unwrap_or(month_end), month_end)
            }
        }
    }
}

/// How the account pays: the mean gap between a charge and the next
/// payment, and the day-weighted average and peak of the running balance
/// over the statement span.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentPattern {
    /// None when no charge is ever followed by a payment.
    pub average_payback_days: Option<Decimal>,
    pub average_outstanding: Decimal,
    pub peak_outstanding: Decimal
}

pub fn payment_pattern(statement: &Statement) -> PaymentPattern {
    let summaries = statement.daily_summaries();

    let charge_dates: Vec<NaiveDate> = summaries.iter()
        .filter(|summary| summary.charges > Decimal::ZERO)
        .map(|summary| summary.date)
        .collect();
    let payment_dates: Vec<NaiveDate> = summaries.iter()
        .filter(|summary| summary.payments > Decimal::ZERO)
        .map(|summary| summary.date)
        .collect();

    let mut payback_total: i64 = 0;
    let mut payback_count: i64 = 0;

    for charge_date in &charge_dates {
        let next_payment = payment_dates.iter().find(|payment| **payment > *charge_date);

        if let Some(payment_date) = next_payment {
            payback_total += (*payment_date - *charge_date).num_days();
            payback_count += 1;
        }
    }

    let average_payback_days = (payback_count > 0)
        .then(|| Decimal::from(payback_total) / Decimal::from(payback_count));

    let mut weighted_sum = Decimal::ZERO;
    let mut peak_outstanding = Decimal::ZERO;
    let mut total_days: i64 = 0;

    for (index, summary) in summaries.iter().enumerate() {
        // each balance holds until the next transaction date; the last one
        // counts for a single day
        let held_days = match summaries.get(index + 1) {
            Some(next) => (next.date - summary.date).num_days(),
            None => 1
        };

        weighted_sum += summary.closing_balance * Decimal::from(held_days);
        total_days += held_days;
        peak_outstanding = peak_outstanding.max(summary.closing_balance);
    }

    let average_outstanding = if total_days > 0 {
        weighted_sum / Decimal::from(total_days)
    } else {
        Decimal::ZERO
    };

    PaymentPattern {
        average_payback_days,
        average_outstanding,
        peak_outstanding
    }
}
