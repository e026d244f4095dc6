//! Read-through TTL caching for contract reads.

use crate::{ChainResult, ElectionContract, EventRecord};
use async_trait::async_trait;
use psephos_cache::TtlCache;
use psephos_core::{Candidate, ElectionInfo, VoteReceipt, VoterHash};
use psephos_error::{ChainError, ChainErrorKind};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};

/// How long the id counter is trusted.
const NEXT_ID_TTL: Duration = Duration::from_secs(30);
/// How long election metadata is trusted.
const INFO_TTL: Duration = Duration::from_secs(120);
/// How long candidate tallies are trusted.
const CANDIDATES_TTL: Duration = Duration::from_secs(60);
/// How long vote totals are trusted.
const TOTAL_VOTES_TTL: Duration = Duration::from_secs(60);
/// How long a failed metadata lookup is remembered.
const NEGATIVE_TTL: Duration = Duration::from_secs(30);

/// Caching decorator over any [`ElectionContract`].
///
/// Read methods go through a passed-in [`TtlCache`]; writes and the
/// duplicate-vote check always reach the inner contract. Failed
/// `election_info` lookups are remembered briefly as null sentinels so a
/// backward id scan does not hammer missing ids on every poll.
///
/// Concurrent misses on the same key are not coalesced: each caller performs
/// its own fetch and the last write wins. The cache deduplicates within the
/// TTL window, not across simultaneous misses.
pub struct CachedContract<C> {
    inner: C,
    cache: Mutex<TtlCache>,
}

impl<C> CachedContract<C> {
    /// Wrap a contract with an explicitly constructed cache.
    pub fn new(inner: C, cache: TtlCache) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
        }
    }

    /// The wrapped contract.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.cache.lock().expect("cache lock poisoned").clear();
    }

    /// Drop the cached entries for one election, e.g. after casting a vote.
    pub fn invalidate_election(&self, election_id: u64) {
        let mut cache = self.cache.lock().expect("cache lock poisoned");
        cache.remove(&info_key(election_id));
        cache.remove(&candidates_key(election_id));
        cache.remove(&total_votes_key(election_id));
    }

    fn cached<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.cache.lock().expect("cache lock poisoned").get_json(key)
    }

    fn store<T: serde::Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        self.cache
            .lock()
            .expect("cache lock poisoned")
            .insert_json(key, value, ttl);
    }
}

fn info_key(election_id: u64) -> String {
    format!("election_info_{election_id}")
}

fn candidates_key(election_id: u64) -> String {
    format!("candidates_{election_id}")
}

fn total_votes_key(election_id: u64) -> String {
    format!("total_votes_{election_id}")
}

#[async_trait]
impl<C: ElectionContract> ElectionContract for CachedContract<C> {
    #[instrument(skip(self))]
    async fn next_election_id(&self) -> ChainResult<u64> {
        const KEY: &str = "next_election_id";
        if let Some(id) = self.cached::<u64>(KEY) {
            debug!(next_id = id, "Election id counter served from cache");
            return Ok(id);
        }
        let id = self.inner.next_election_id().await?;
        self.store(KEY, &id, NEXT_ID_TTL);
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo> {
        let key = info_key(election_id);
        if let Some(cached) = self.cached::<Option<ElectionInfo>>(&key) {
            return match cached {
                Some(info) => Ok(info),
                // Null sentinel: the last lookup failed recently.
                None => Err(ChainError::new(ChainErrorKind::NoSuchElection(election_id))),
            };
        }
        match self.inner.election_info(election_id).await {
            Ok(info) => {
                self.store(&key, &Some(info.clone()), INFO_TTL);
                Ok(info)
            }
            Err(e) => {
                debug!(election_id, error = %e, "Caching failed election lookup");
                self.store::<Option<ElectionInfo>>(&key, &None, NEGATIVE_TTL);
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>> {
        let key = candidates_key(election_id);
        if let Some(candidates) = self.cached::<Vec<Candidate>>(&key) {
            return Ok(candidates);
        }
        let candidates = self.inner.candidates(election_id).await?;
        self.store(&key, &candidates, CANDIDATES_TTL);
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn total_votes(&self, election_id: u64) -> ChainResult<u64> {
        let key = total_votes_key(election_id);
        if let Some(total) = self.cached::<u64>(&key) {
            return Ok(total);
        }
        let total = self.inner.total_votes(election_id).await?;
        self.store(&key, &total, TOTAL_VOTES_TTL);
        Ok(total)
    }

    // Never cached: the contract is the authority on duplicate votes.
    async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool> {
        self.inner.has_voted(election_id, voter).await
    }

    #[instrument(skip(self, voter))]
    async fn cast_vote(
        &self,
        election_id: u64,
        candidate_index: u32,
        voter: &VoterHash,
    ) -> ChainResult<VoteReceipt> {
        let receipt = self.inner.cast_vote(election_id, candidate_index, voter).await?;
        // Tallies just changed; let the next read refetch them.
        self.invalidate_election(election_id);
        Ok(receipt)
    }

    async fn admin_address(&self) -> ChainResult<String> {
        self.inner.admin_address().await
    }

    async fn latest_block(&self) -> ChainResult<u64> {
        self.inner.latest_block().await
    }

    async fn election_created_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        self.inner.election_created_events(from_block, to_block).await
    }

    async fn vote_cast_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        self.inner.vote_cast_events(from_block, to_block).await
    }
}
