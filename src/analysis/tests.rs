use super::{payment_pattern, payment_windows, summarize_account, summarize_vehicles, TimeWindow};

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::ledger::Statement;
use crate::models::{Transaction, TransactionKind};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn create_transaction(on: NaiveDate, amount: Decimal, kind: TransactionKind) -> Transaction {
    Transaction {
        date: on,
        account_id: 1,
        vehicle_id: None,
        amount,
        kind,
        description: None
    }
}

fn create_vehicle_charge(on: NaiveDate, amount: Decimal, vehicle: &str) -> Transaction {
    Transaction {
        vehicle_id: Some(vehicle.to_string()),
        ..create_transaction(on, amount, TransactionKind::Charge)
    }
}

#[test]
fn test_account_summary_totals_and_balances() -> Result<()> {
    let statement = Statement::build(1, &[
        create_transaction(date(2024, 1, 1), dec!(1000), TransactionKind::Charge),
        create_transaction(date(2024, 1, 15), dec!(400), TransactionKind::Payment),
        create_transaction(date(2024, 2, 1), dec!(250), TransactionKind::Charge)
    ])?;

    let summary = summarize_account(&statement);

    assert_eq!(summary.transaction_count, 3);
    assert_eq!(summary.total_charges, dec!(1250));
    assert_eq!(summary.total_payments, dec!(400));
    assert_eq!(summary.opening_balance, dec!(1000));
    assert_eq!(summary.closing_balance, dec!(850));

    Ok(())
}

#[test]
fn test_vehicle_summaries_rank_by_total_charged() {
    let transactions = vec![
        create_vehicle_charge(date(2024, 1, 3), dec!(200), "GJ-05-AB-1234"),
        create_vehicle_charge(date(2024, 1, 7), dec!(900), "GJ-05-XY-9876"),
        create_vehicle_charge(date(2024, 2, 11), dec!(300), "GJ-05-AB-1234"),
        // payments and vehicle-less records stay out of the rollup
        create_transaction(date(2024, 1, 9), dec!(450), TransactionKind::Payment),
        create_transaction(date(2024, 1, 12), dec!(80), TransactionKind::Charge)
    ];

    let summaries = summarize_vehicles(&transactions);

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].vehicle_id, "GJ-05-XY-9876");
    assert_eq!(summaries[0].total_charged, dec!(900));
    assert_eq!(summaries[1].vehicle_id, "GJ-05-AB-1234");
    assert_eq!(summaries[1].transaction_count, 2);
    assert_eq!(summaries[1].total_charged, dec!(500));
    assert_eq!(summaries[1].first_date, date(2024, 1, 3));
    assert_eq!(summaries[1].last_date, date(2024, 2, 11));
}

#[test]
fn test_monthly_windows_bucket_by_calendar_month() {
    let transactions = vec![
        create_transaction(date(2024, 1, 5), dec!(500), TransactionKind::Charge),
        create_transaction(date(2024, 1, 28), dec!(200), TransactionKind::Payment),
        create_transaction(date(2024, 2, 2), dec!(350), TransactionKind::Charge)
    ];

    let windows = payment_windows(&transactions, TimeWindow::Monthly);

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start_date, date(2024, 1, 1));
    assert_eq!(windows[0].end_date, date(2024, 1, 31));
    assert_eq!(windows[0].charges, dec!(500));
    assert_eq!(windows[0].payments, dec!(200));
    assert_eq!(windows[0].net, dec!(300));
    assert_eq!(windows[1].start_date, date(2024, 2, 1));
    assert_eq!(windows[1].end_date, date(2024, 2, 29));
}

#[test]
fn test_half_month_windows_split_on_day_fifteen() {
    let transactions = vec![
        create_transaction(date(2024, 1, 15), dec!(100), TransactionKind::Charge),
        create_transaction(date(2024, 1, 16), dec!(40), TransactionKind::Charge)
    ];

    let windows = payment_windows(&transactions, TimeWindow::HalfMonthly);

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start_date, date(2024, 1, 1));
    assert_eq!(windows[0].end_date, date(2024, 1, 15));
    assert_eq!(windows[0].charges, dec!(100));
    assert_eq!(windows[1].start_date, date(2024, 1, 16));
    assert_eq!(windows[1].end_date, date(2024, 1, 31));
    assert_eq!(windows[1].charges, dec!(40));
}

#[test]
fn test_payment_pattern_metrics() -> Result<()> {
    let statement = Statement::build(1, &[
        create_transaction(date(2024, 1, 1), dec!(1000), TransactionKind::Charge),
        create_transaction(date(2024, 1, 10), dec!(500), TransactionKind::Charge),
        create_transaction(date(2024, 1, 15), dec!(600), TransactionKind::Payment)
    ])?;

    let pattern = payment_pattern(&statement);

    // charge on the 1st paid back after 14 days, charge on the 10th after 5
    assert_eq!(pattern.average_payback_days, Some(dec!(9.5)));
    // 1000 for 9 days, 1500 for 5 days, 900 for the final day
    assert_eq!(pattern.average_outstanding, dec!(1160));
    assert_eq!(pattern.peak_outstanding, dec!(1500));

    Ok(())
}

#[test]
fn test_payment_pattern_of_empty_statement_is_inert() -> Result<()> {
    let statement = Statement::build(1, &[])?;
    let pattern = payment_pattern(&statement);

    assert!(pattern.average_payback_days.is_none());
    assert_eq!(pattern.average_outstanding, Decimal::ZERO);
    assert_eq!(pattern.peak_outstanding, Decimal::ZERO);

    Ok(())
}
