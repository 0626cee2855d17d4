use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::AccountId;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Record is missing an account id")]
    MissingAccount,
    #[error("Record for account [{account_id}] is missing a date")]
    MissingDate {
        account_id: AccountId
    },
    #[error("Record for account [{account_id}] has an unreadable date [{value}]")]
    InvalidDate {
        account_id: AccountId,
        value: String
    },
    #[error("Record for account [{account_id}] on {date} is missing an amount")]
    MissingAmount {
        account_id: AccountId,
        date: NaiveDate
    },
    #[error("Record for account [{account_id}] on {date} has a negative amount [{amount}]; the sign belongs to the record type")]
    NegativeAmount {
        account_id: AccountId,
        date: NaiveDate,
        amount: Decimal
    },
    #[error("Record for account [{account_id}] on {date} is missing a type")]
    MissingKind {
        account_id: AccountId,
        date: NaiveDate
    },
    #[error("Transaction for account [{found}] mixed into the statement of account [{expected}]")]
    MixedAccounts {
        expected: AccountId,
        found: AccountId
    }
}

impl ValidationError {
    pub fn missing_date(account_id: AccountId) -> Self {
        Self::MissingDate { account_id }
    }

    pub fn invalid_date(account_id: AccountId, value: &str) -> Self {
        Self::InvalidDate {
            account_id,
            value: value.to_string()
        }
    }

    pub fn missing_amount(account_id: AccountId, date: NaiveDate) -> Self {
        Self::MissingAmount { account_id, date }
    }

    pub fn negative_amount(account_id: AccountId, date: NaiveDate, amount: Decimal) -> Self {
        Self::NegativeAmount { account_id, date, amount }
    }

    pub fn missing_kind(account_id: AccountId, date: NaiveDate) -> Self {
        Self::MissingKind { account_id, date }
    }

    pub fn mixed_accounts(expected: AccountId, found: AccountId) -> Self {
        Self::MixedAccounts { expected, found }
    }
}
