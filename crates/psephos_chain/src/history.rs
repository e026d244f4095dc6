//! Transaction history reconstructed from contract events.

use crate::{ChainResult, ElectionContract, EventRecord};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use psephos_cache::TtlCache;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// How many blocks one history page scans.
const BLOCK_WINDOW: u64 = 5_000;
/// How long a history page is trusted.
const PAGE_TTL: Duration = Duration::from_secs(120);
/// How long a failed page fetch is remembered.
const FAILED_PAGE_TTL: Duration = Duration::from_secs(30);

/// Contract method a history entry corresponds to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum CallMethod {
    /// An election was created
    #[display("createElection")]
    CreateElection,
    /// A vote was cast
    #[display("castVote")]
    CastVote,
}

/// Mined status of a history entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum TxStatus {
    /// Transaction was mined successfully
    #[display("Confirmed")]
    Confirmed,
    /// Transaction was mined but reverted
    #[display("Failed")]
    Failed,
}

/// One contract transaction in the history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ChainTransaction {
    /// Transaction hash
    hash: String,
    /// Block timestamp
    timestamp: DateTime<Utc>,
    /// Sender address
    from: String,
    /// Contract address
    to: String,
    /// Which contract method was called
    method: CallMethod,
    /// Block the transaction was mined in
    block_number: u64,
    /// Mined status
    status: TxStatus,
}

/// One page of contract history, newest first, with a cursor for the next
/// older page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct TransactionPage {
    /// Transactions in this page
    transactions: Vec<ChainTransaction>,
    /// Whether older history may exist below this page
    has_more: bool,
    /// Block to start the next page from
    next_block: Option<u64>,
}

impl TransactionPage {
    fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            has_more: false,
            next_block: None,
        }
    }
}

/// Pages through contract creation and vote events for transparency views.
///
/// Event queries are bounded to a window of recent blocks per page; each page
/// is cached so polling views do not re-walk the chain within the TTL.
pub struct HistoryReader<C> {
    contract: C,
    contract_address: String,
    cache: Mutex<TtlCache>,
}

impl<C: ElectionContract> HistoryReader<C> {
    /// Create a reader over a contract with an explicitly constructed cache.
    pub fn new(contract: C, contract_address: impl Into<String>, cache: TtlCache) -> Self {
        Self {
            contract,
            contract_address: contract_address.into(),
            cache: Mutex::new(cache),
        }
    }

    /// The wrapped contract.
    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// Fetch one page of history.
    ///
    /// `start_block` of `None` pages from the chain head; otherwise pass the
    /// `next_block` cursor from a previous page. Per-event-type query
    /// failures are logged and skipped; a page that cannot be assembled at
    /// all degrades to an empty page rather than an error.
    #[instrument(skip(self))]
    pub async fn page(&self, start_block: Option<u64>, page_size: usize) -> TransactionPage {
        let key = match start_block {
            Some(block) => format!("transactions_{block}_{page_size}"),
            None => format!("transactions_latest_{page_size}"),
        };
        if let Some(page) = self.cached(&key) {
            debug!("History page served from cache");
            return page;
        }

        match self.fetch_page(start_block, page_size).await {
            Ok(page) => {
                self.store(&key, &page, PAGE_TTL);
                page
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch history page");
                let page = TransactionPage::empty();
                self.store(&key, &page, FAILED_PAGE_TTL);
                page
            }
        }
    }

    async fn fetch_page(
        &self,
        start_block: Option<u64>,
        page_size: usize,
    ) -> ChainResult<TransactionPage> {
        let upper = match start_block {
            Some(block) => block,
            None => self.contract.latest_block().await?,
        };
        let lower = upper.saturating_sub(BLOCK_WINDOW);
        debug!(lower, upper, "Scanning block window for contract events");

        let mut transactions = Vec::new();

        match self.contract.election_created_events(lower, upper).await {
            Ok(events) => {
                debug!(count = events.len(), "Found ElectionCreated events");
                transactions.extend(
                    events
                        .into_iter()
                        .map(|e| self.convert(e, CallMethod::CreateElection)),
                );
            }
            Err(e) => warn!(error = %e, "Failed to query ElectionCreated events"),
        }

        if transactions.len() < page_size {
            match self.contract.vote_cast_events(lower, upper).await {
                Ok(events) => {
                    debug!(count = events.len(), "Found VoteCast events");
                    transactions.extend(
                        events
                            .into_iter()
                            .map(|e| self.convert(e, CallMethod::CastVote)),
                    );
                }
                Err(e) => warn!(error = %e, "Failed to query VoteCast events"),
            }
        }

        // Newest first.
        transactions.sort_by(|a, b| b.block_number.cmp(&a.block_number));
        transactions.truncate(page_size);

        let has_more = !transactions.is_empty() && lower > 0;
        let next_block = if has_more {
            transactions
                .last()
                .map(|tx| tx.block_number.saturating_sub(1))
        } else {
            None
        };

        Ok(TransactionPage {
            transactions,
            has_more,
            next_block,
        })
    }

    fn convert(&self, event: EventRecord, method: CallMethod) -> ChainTransaction {
        let status = if *event.confirmed() {
            TxStatus::Confirmed
        } else {
            TxStatus::Failed
        };
        ChainTransaction {
            hash: event.transaction_hash().clone(),
            timestamp: *event.timestamp(),
            from: event.from().clone(),
            to: self.contract_address.clone(),
            method,
            block_number: *event.block_number(),
            status,
        }
    }

    fn cached(&self, key: &str) -> Option<TransactionPage> {
        self.cache.lock().expect("cache lock poisoned").get_json(key)
    }

    fn store(&self, key: &str, page: &TransactionPage, ttl: Duration) {
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert_json(key, page, ttl);
    }
}
