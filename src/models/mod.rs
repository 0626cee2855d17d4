mod errors;
#[cfg(test)]
mod tests;
mod transaction;

use serde::Deserialize;

pub use errors::ValidationError;
pub use transaction::{RawRecord, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Charge,
    Payment
}
