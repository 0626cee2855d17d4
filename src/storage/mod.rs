mod ledger_store;

use std::sync::Arc;

use crate::ledger::AccountLedger;
use crate::types::AccountId;

pub use ledger_store::LedgerStore;

pub trait Storage: Send + Sync + 'static {
    fn load(&self, account_id: AccountId) -> Option<Arc<AccountLedger>>;
    fn save(&self, account_id: AccountId, ledger: AccountLedger);
}
