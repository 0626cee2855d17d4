use super::{RawRecord, Transaction, TransactionKind};

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::errors::ValidationError;

fn create_record(date: Option<&str>, account_id: Option<u32>, amount: Option<Decimal>, kind: Option<TransactionKind>) -> RawRecord {
    RawRecord {
        date: date.map(str::to_string),
        account_id,
        vehicle_id: None,
        amount,
        kind,
        description: None
    }
}

#[test]
fn test_valid_record_converts_into_transaction() -> Result<()> {
    let record = create_record(Some("2024-04-01"), Some(7), Some(dec!(1500.50)), Some(TransactionKind::Charge));
    let transaction = Transaction::try_from(record)?;

    assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    assert_eq!(transaction.account_id, 7);
    assert_eq!(transaction.amount, dec!(1500.50));
    assert_eq!(transaction.kind, TransactionKind::Charge);

    Ok(())
}

#[test]
fn test_legacy_date_format_is_accepted() -> Result<()> {
    let record = create_record(Some("15/04/2024"), Some(7), Some(dec!(100)), Some(TransactionKind::Payment));
    let transaction = Transaction::try_from(record)?;

    assert_eq!(transaction.date, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());

    Ok(())
}

#[test]
fn test_missing_date_fails_validation() {
    let record = create_record(None, Some(7), Some(dec!(100)), Some(TransactionKind::Charge));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::MissingDate { account_id: 7 })));
}

#[test]
fn test_blank_date_counts_as_missing() {
    let record = create_record(Some("   "), Some(7), Some(dec!(100)), Some(TransactionKind::Charge));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::MissingDate { .. })));
}

#[test]
fn test_unreadable_date_fails_validation() {
    let record = create_record(Some("April 1st"), Some(7), Some(dec!(100)), Some(TransactionKind::Charge));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::InvalidDate { .. })));
}

#[test]
fn test_missing_account_fails_validation() {
    let record = create_record(Some("2024-04-01"), None, Some(dec!(100)), Some(TransactionKind::Charge));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::MissingAccount)));
}

#[test]
fn test_missing_amount_fails_validation() {
    let record = create_record(Some("2024-04-01"), Some(7), None, Some(TransactionKind::Charge));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::MissingAmount { .. })));
}

#[test]
fn test_negative_amount_fails_validation() {
    let record = create_record(Some("2024-04-01"), Some(7), Some(dec!(-10)), Some(TransactionKind::Payment));
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::NegativeAmount { .. })));
}

#[test]
fn test_missing_kind_fails_validation() {
    let record = create_record(Some("2024-04-01"), Some(7), Some(dec!(100)), None);
    let result = Transaction::try_from(record);

    assert!(matches!(result, Err(ValidationError::MissingKind { .. })));
}

#[test]
fn test_blank_vehicle_and_description_become_none() -> Result<()> {
    let mut record = create_record(Some("2024-04-01"), Some(7), Some(dec!(100)), Some(TransactionKind::Charge));
    record.vehicle_id = Some("  ".to_string());
    record.description = Some("".to_string());

    let transaction = Transaction::try_from(record)?;

    assert!(transaction.vehicle_id.is_none());
    assert!(transaction.description.is_none());

    Ok(())
}

#[test]
fn test_signed_amount_applies_the_sign_convention() -> Result<()> {
    let charge = Transaction::try_from(create_record(Some("2024-04-01"), Some(7), Some(dec!(250)), Some(TransactionKind::Charge)))?;
    let payment = Transaction::try_from(create_record(Some("2024-04-02"), Some(7), Some(dec!(250)), Some(TransactionKind::Payment)))?;

    assert_eq!(charge.signed_amount(), dec!(250));
    assert_eq!(payment.signed_amount(), dec!(-250));

    Ok(())
}
