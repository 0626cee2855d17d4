use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::errors::ValidationError;
use crate::models::TransactionKind;
use crate::types::{AccountId, VehicleId};

/// A single row as it appears in the input file, before validation.
///
/// Every field is optional because flat exports routinely carry blank
/// cells; `Transaction::try_from` decides what is actually required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub date: Option<String>,
    #[serde(rename = "account")]
    pub account_id: Option<AccountId>,
    #[serde(rename = "vehicle")]
    pub vehicle_id: Option<VehicleId>,
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    pub description: Option<String>
}

/// A validated ledger record.
///
/// Validation happens exactly once, at the load boundary; the rest of the
/// pipeline can rely on every field being present and the amount being
/// non-negative. The sign of a movement lives in `kind`, not in `amount`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub account_id: AccountId,
    pub vehicle_id: Option<VehicleId>,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub description: Option<String>
}

impl Transaction {
    /// Amount under the ledger sign convention: charges add to the balance
    /// the customer owes, payments subtract from it.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Charge => self.amount,
            TransactionKind::Payment => -self.amount
        }
    }
}

impl TryFrom<RawRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: RawRecord) -> Result<Self, Self::Error> {
        let Some(account_id) = record.account_id else {
            return Err(ValidationError::MissingAccount)
        };

        let date = match record.date.as_deref().map(str::trim) {
            None | Some("") => return Err(ValidationError::missing_date(account_id)),
            Some(value) => parse_date(value)
                .ok_or_else(|| ValidationError::invalid_date(account_id, value))?
        };

        let Some(amount) = record.amount else {
            return Err(ValidationError::missing_amount(account_id, date))
        };

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::negative_amount(account_id, date, amount));
        }

        let Some(kind) = record.kind else {
            return Err(ValidationError::missing_kind(account_id, date))
        };

        Ok(Self {
            date,
            account_id,
            vehicle_id: record.vehicle_id.filter(|vehicle| !vehicle.trim().is_empty()),
            amount,
            kind,
            description: record.description.filter(|text| !text.trim().is_empty())
        })
    }
}

/// Dates arrive as ISO `YYYY-MM-DD`; older statement exports still use
/// `DD/MM/YYYY`, so that form is accepted as a fallback.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .ok()
}
