//! Shared in-memory doubles for flow tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use psephos_chain::{ChainResult, ElectionContract, EventRecord};
use psephos_core::{
    AdminConfig, Candidate, ElectionInfo, VoteReceipt, VoteReceiptBuilder, VoterHash, VoterRecord,
    VoterStatus,
};
use psephos_database::{RegistryResult, VoterRegistry};
use psephos_error::{ChainError, ChainErrorKind, RegistryError, RegistryErrorKind};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the deployed contract.
#[derive(Default)]
pub struct MockContract {
    pub next_id: Option<u64>,
    pub elections: HashMap<u64, ElectionInfo>,
    pub candidates: HashMap<u64, Vec<Candidate>>,
    pub admin: String,
    pub fail_has_voted: bool,
    pub voted: Mutex<HashSet<(u64, String)>>,
}

#[async_trait]
impl ElectionContract for MockContract {
    async fn next_election_id(&self) -> ChainResult<u64> {
        self.next_id.ok_or_else(|| {
            ChainError::new(ChainErrorKind::CounterUnreadable("rpc timeout".into()))
        })
    }

    async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo> {
        self.elections
            .get(&election_id)
            .cloned()
            .ok_or_else(|| ChainError::new(ChainErrorKind::NoSuchElection(election_id)))
    }

    async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>> {
        Ok(self.candidates.get(&election_id).cloned().unwrap_or_default())
    }

    async fn total_votes(&self, election_id: u64) -> ChainResult<u64> {
        Ok(self.voted.lock().unwrap().iter().filter(|(id, _)| *id == election_id).count() as u64)
    }

    async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool> {
        if self.fail_has_voted {
            return Err(ChainError::new(ChainErrorKind::Rpc("connection reset".into())));
        }
        let voted = self.voted.lock().unwrap();
        Ok(voted.contains(&(election_id, voter.to_hex())))
    }

    async fn cast_vote(
        &self,
        election_id: u64,
        _candidate_index: u32,
        voter: &VoterHash,
    ) -> ChainResult<VoteReceipt> {
        let mut voted = self.voted.lock().unwrap();
        if !voted.insert((election_id, voter.to_hex())) {
            return Err(ChainError::new(ChainErrorKind::Revert(
                "voter has already voted".into(),
            )));
        }
        Ok(VoteReceiptBuilder::default()
            .transaction_hash("0xabc123".to_string())
            .election_id(election_id)
            .from(Some("0xvoter".to_string()))
            .to(Some("0xcontract".to_string()))
            .block_number(Some(42))
            .build()
            .unwrap())
    }

    async fn admin_address(&self) -> ChainResult<String> {
        Ok(self.admin.clone())
    }

    async fn latest_block(&self) -> ChainResult<u64> {
        Ok(1)
    }

    async fn election_created_events(
        &self,
        _from_block: u64,
        _to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        Ok(Vec::new())
    }

    async fn vote_cast_events(
        &self,
        _from_block: u64,
        _to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        Ok(Vec::new())
    }
}

/// In-memory stand-in for the voter registry.
///
/// Cloning yields a handle on the same rows, so a test can keep one handle
/// and give another to the flow under test.
#[derive(Clone, Default)]
pub struct MockRegistry {
    inner: Arc<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    rows: Mutex<HashMap<String, VoterRecord>>,
    lock_state: Mutex<Option<(String, bool)>>,
    fail_status_writes: AtomicBool,
}

impl MockRegistry {
    pub fn with_voter(self, wallet: &str, nin: &str, status: VoterStatus) -> Self {
        let record = VoterRecord::new(
            wallet.to_lowercase(),
            nin.to_string(),
            status,
            Utc::now(),
        );
        self.inner
            .rows
            .lock()
            .unwrap()
            .insert(wallet.to_lowercase(), record);
        self
    }

    pub fn locked(self, locked: bool) -> Self {
        *self.inner.lock_state.lock().unwrap() = Some(("0xadmin".to_string(), locked));
        self
    }

    pub fn fail_status_writes(self) -> Self {
        self.inner.fail_status_writes.store(true, Ordering::SeqCst);
        self
    }

    pub fn status_of(&self, wallet: &str) -> Option<VoterStatus> {
        self.inner
            .rows
            .lock()
            .unwrap()
            .get(&wallet.to_lowercase())
            .map(|r| *r.status())
    }

    pub fn lock_flag(&self) -> Option<bool> {
        self.inner
            .lock_state
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, locked)| *locked)
    }
}

#[async_trait]
impl VoterRegistry for MockRegistry {
    async fn find_by_wallet(&self, wallet_address: &str) -> RegistryResult<Option<VoterRecord>> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.get(&wallet_address.trim().to_lowercase()).cloned())
    }

    async fn find_by_nin(&self, nin: &str) -> RegistryResult<Option<VoterRecord>> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.values().find(|r| r.nin() == nin).cloned())
    }

    async fn insert_voter(&self, wallet_address: &str, nin: &str) -> RegistryResult<VoterRecord> {
        let record = VoterRecord::new(
            wallet_address.trim().to_lowercase(),
            nin.to_string(),
            VoterStatus::NotVoted,
            Utc::now(),
        );
        self.inner
            .rows
            .lock()
            .unwrap()
            .insert(record.wallet_address().clone(), record.clone());
        Ok(record)
    }

    async fn set_status(&self, wallet_address: &str, status: VoterStatus) -> RegistryResult<()> {
        if self.inner.fail_status_writes.load(Ordering::SeqCst) {
            return Err(RegistryError::new(RegistryErrorKind::Connection(
                "connection closed".into(),
            )));
        }
        let mut rows = self.inner.rows.lock().unwrap();
        if let Some(record) = rows.get(&wallet_address.trim().to_lowercase()) {
            let updated = VoterRecord::new(
                record.wallet_address().clone(),
                record.nin().clone(),
                status,
                *record.created_at(),
            );
            rows.insert(updated.wallet_address().clone(), updated);
        }
        Ok(())
    }

    async fn reset_all_statuses(&self) -> RegistryResult<usize> {
        let mut rows = self.inner.rows.lock().unwrap();
        let voted: Vec<VoterRecord> = rows
            .values()
            .filter(|r| *r.status() == VoterStatus::Voted)
            .cloned()
            .collect();
        let changed = voted.len();
        for record in voted {
            let reset = VoterRecord::new(
                record.wallet_address().clone(),
                record.nin().clone(),
                VoterStatus::NotVoted,
                *record.created_at(),
            );
            rows.insert(reset.wallet_address().clone(), reset);
        }
        Ok(changed)
    }

    async fn all_voters(&self) -> RegistryResult<Vec<VoterRecord>> {
        let rows = self.inner.rows.lock().unwrap();
        Ok(rows.values().cloned().collect())
    }

    async fn submission_locked(&self) -> RegistryResult<bool> {
        let lock_state = self.inner.lock_state.lock().unwrap();
        Ok(lock_state.as_ref().map(|(_, locked)| *locked).unwrap_or(false))
    }

    async fn set_submission_lock(&self, locked: bool, admin_address: &str) -> RegistryResult<()> {
        let mut lock_state = self.inner.lock_state.lock().unwrap();
        let admin = match lock_state.take() {
            Some((admin, _)) => admin,
            None => admin_address.trim().to_lowercase(),
        };
        *lock_state = Some((admin, locked));
        Ok(())
    }

    async fn admin_config(&self) -> RegistryResult<Option<AdminConfig>> {
        let lock_state = self.inner.lock_state.lock().unwrap();
        Ok(lock_state
            .as_ref()
            .map(|(admin, locked)| AdminConfig::new(1, admin.clone(), *locked)))
    }
}

/// An election whose window starts and ends at minute offsets from `now`.
pub fn election(
    name: &str,
    now: DateTime<Utc>,
    start_offset_mins: i64,
    end_offset_mins: i64,
    active: bool,
) -> ElectionInfo {
    ElectionInfo::new(
        name.to_string(),
        now + Duration::minutes(start_offset_mins),
        now + Duration::minutes(end_offset_mins),
        active,
        3,
    )
}

/// A three-candidate ballot.
pub fn ballot() -> Vec<Candidate> {
    vec![
        Candidate::new("Ada".to_string(), "Analytical".to_string(), 0, 0),
        Candidate::new("Grace".to_string(), "Compiler".to_string(), 0, 1),
        Candidate::new("Edsger".to_string(), "Structured".to_string(), 0, 2),
    ]
}
