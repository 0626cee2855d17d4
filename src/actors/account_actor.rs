use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::ledger::AccountLedger;
use crate::models::Transaction;
use crate::storage::Storage;
use crate::types::AccountId;

/// Ingestion worker for a single account.
///
/// Buffers the account's validated transactions and, once its channel
/// closes, merges them onto whatever ledger is already stored — so several
/// input files accumulate into one history.
pub struct AccountActor {
    sender: mpsc::UnboundedSender<Transaction>,
    handle: JoinHandle<()>
}

impl AccountActor {
    pub fn new<S: Storage>(account_id: AccountId, storage: Arc<S>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Transaction>();

        let handle = spawn(async move {
            let mut buffered: Vec<Transaction> = Vec::new();

            while let Some(transaction) = receiver.recv().await {
                buffered.push(transaction);
            }

            let ledger = match storage.load(account_id) {
                Some(existing) => existing.extended(buffered),
                None => AccountLedger::new(account_id, buffered)
            };

            debug!("Ledger for account [{}] now holds {} transactions", account_id, ledger.len());

            storage.save(account_id, ledger);
        });

        Self { sender, handle }
    }

    /// Queues a transaction for this account; false once the actor is gone.
    pub fn accept(&self, transaction: &Transaction) -> bool {
        self.sender.send(transaction.clone()).is_ok()
    }

    /// Closes the input channel and waits until the ledger is saved.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
