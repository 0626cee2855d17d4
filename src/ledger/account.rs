use crate::ledger::Statement;
use crate::models::{Transaction, ValidationError};
use crate::types::AccountId;

/// The immutable per-account dataset produced by loading.
///
/// Transactions are kept in the order they arrived; ordering by date is the
/// aggregator's job, so a ledger assembled from several input files still
/// produces a correct statement.
#[derive(Debug, Clone)]
pub struct AccountLedger {
    pub account_id: AccountId,
    transactions: Vec<Transaction>
}

impl AccountLedger {
    pub fn new(account_id: AccountId, transactions: Vec<Transaction>) -> Self {
        Self {
            account_id,
            transactions
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Returns a new ledger with `additional` appended after the existing
    /// records, preserving arrival order on both sides.
    pub fn extended(&self, additional: impl IntoIterator<Item = Transaction>) -> Self {
        let mut transactions = self.transactions.clone();
        transactions.extend(additional);

        Self::new(self.account_id, transactions)
    }

    pub fn statement(&self) -> Result<Statement, ValidationError> {
        Statement::build(self.account_id, &self.transactions)
    }
}
