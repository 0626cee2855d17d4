use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use csv::{ReaderBuilder, Trim};
use moka::future::Cache;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{error, warn};

use crate::actors::AccountActor;
use crate::config::EngineConfig;
use crate::models::{RawRecord, Transaction};
use crate::report::AccountReport;
use crate::storage::{LedgerStore, Storage};
use crate::types::AccountId;

const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Streaming engine over flat ledger files.
///
/// `run` partitions a CSV or JSON file into per-account ledgers through one
/// ingestion actor per account; `report` serves the computed per-account
/// reports through a bounded read-through cache, so repeated dashboard
/// views of the same account do not recompute.
pub struct ReportEngine {
    storage: Arc<LedgerStore>,
    config: EngineConfig,
    backpressure: usize,
    cache_capacity: u64,
    cache_ttl: Option<Duration>,
    reports: Cache<AccountId, Arc<AccountReport>>
}

impl ReportEngine {
    pub fn new(storage: Arc<LedgerStore>, config: EngineConfig) -> Self {
        Self {
            storage,
            config,
            backpressure: 256,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: None,
            reports: build_cache(DEFAULT_CACHE_CAPACITY, None)
        }
    }

    /// Caps how many computed reports stay cached.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self.reports = build_cache(self.cache_capacity, self.cache_ttl);

        self
    }

    /// Expires cached reports after `timeout`.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_ttl = Some(timeout);
        self.reports = build_cache(self.cache_capacity, self.cache_ttl);

        self
    }

    /// Orchestrates the end-to-end ingestion pipeline for one input file.
    /// Files can be layered: ledgers from earlier runs are extended, not
    /// replaced, and stale cached reports are dropped.
    pub async fn run(&self, path: &str) -> anyhow::Result<()> {
        let (sender, receiver) = mpsc::channel::<Transaction>(self.backpressure);
        let reader_handle = self.spawn_reader(path.to_string(), sender);
        let routing_result = self.route_transactions(receiver).await;

        if let Err(error) = reader_handle.await {
            error!("Ledger ingestion failed: {error}");
        }

        self.reports.invalidate_all();

        routing_result
    }

    /// The report for one account, computed on demand and cached until the
    /// next `run` or eviction. A failed account logs a warning and yields
    /// `None` without affecting any other account's section.
    pub async fn report(&self, account_id: AccountId) -> Option<Arc<AccountReport>> {
        let ledger = self.storage.load(account_id)?;
        let interest = self.config.interest();
        let as_of = self.config.as_of;

        let result = self.reports.try_get_with(account_id, async move {
            AccountReport::build(&ledger, &interest, as_of).map(Arc::new)
        }).await;

        match result {
            Ok(report) => Some(report),
            Err(error) => {
                warn!("Report for account [{account_id}] unavailable: {error}");
                None
            }
        }
    }

    /// Accounts with a loaded ledger, ascending.
    pub fn account_ids(&self) -> Vec<AccountId> {
        self.storage.account_ids()
    }

    fn spawn_reader(&self, path: String, sender: mpsc::Sender<Transaction>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening ledger file at path: {path} | {error}");
                    return;
                }
            };

            let is_json = Path::new(&path)
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

            if is_json {
                read_json_records(file, &sender);
            } else {
                read_csv_records(file, &sender);
            }
        })
    }

    async fn route_transactions(&self, mut receiver: mpsc::Receiver<Transaction>) -> anyhow::Result<()> {
        let mut actors = HashMap::<AccountId, AccountActor>::new();

        while let Some(transaction) = receiver.recv().await {
            let actor = actors.entry(transaction.account_id).or_insert_with(|| {
                AccountActor::new(transaction.account_id, self.storage.clone())
            });

            if !actor.accept(&transaction) {
                error!("Ingestion actor for account [{}] could not accept a transaction dated {}", transaction.account_id, transaction.date);
            }
        }

        for (account_id, actor) in actors {
            if let Err(error) = actor.despawn().await {
                error!("Ingestion actor for account [{account_id}] did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}

fn build_cache(capacity: u64, ttl: Option<Duration>) -> Cache<AccountId, Arc<AccountReport>> {
    let mut builder = Cache::builder().max_capacity(capacity);

    if let Some(ttl) = ttl {
        builder = builder.time_to_live(ttl);
    }

    builder.build()
}

fn read_csv_records(file: File, sender: &mpsc::Sender<Transaction>) {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    for result in reader.deserialize::<RawRecord>() {
        match result {
            Ok(record) => {
                if !forward_record(record, sender) {
                    break;
                }
            }
            Err(error) => {
                error!("CSV deserialization error: {error}");
            }
        }
    }
}

fn read_json_records(file: File, sender: &mpsc::Sender<Transaction>) {
    let records: Vec<RawRecord> = match serde_json::from_reader(BufReader::new(file)) {
        Ok(records) => records,
        Err(error) => {
            error!("JSON deserialization error: {error}");
            return;
        }
    };

    for record in records {
        if !forward_record(record, sender) {
            break;
        }
    }
}

/// Validates one raw record and ships it downstream; invalid records are
/// skipped with a warning, and `false` means the channel closed.
fn forward_record(record: RawRecord, sender: &mpsc::Sender<Transaction>) -> bool {
    match Transaction::try_from(record) {
        Ok(transaction) => sender.blocking_send(transaction).is_ok(),
        Err(error) => {
            warn!("Skipping record: {error}");
            true
        }
    }
}
