use std::sync::Arc;

use dashmap::DashMap;

use crate::ledger::AccountLedger;
use crate::storage::Storage;
use crate::types::AccountId;

/// In-memory home of the loaded dataset: one immutable ledger per account.
/// Ledgers are replaced wholesale on save, never mutated in place.
pub struct LedgerStore {
    ledgers: DashMap<AccountId, Arc<AccountLedger>>
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            ledgers: DashMap::new()
        }
    }

    /// Account ids currently held, ascending.
    pub fn account_ids(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.ledgers.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();

        ids
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LedgerStore {
    fn load(&self, account_id: AccountId) -> Option<Arc<AccountLedger>> {
        self.ledgers.get(&account_id).map(|entry| entry.value().clone())
    }

    fn save(&self, account_id: AccountId, ledger: AccountLedger) {
        self.ledgers.insert(account_id, Arc::new(ledger));
    }
}
