//! Shared in-memory contract double for chain tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use psephos_chain::{ChainResult, ElectionContract, EventRecord};
use psephos_core::{Candidate, ElectionInfo, VoteReceipt, VoteReceiptBuilder, VoterHash};
use psephos_error::{ChainError, ChainErrorKind};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory stand-in for the deployed contract.
#[derive(Default)]
pub struct MockContract {
    pub next_id: Option<u64>,
    pub elections: HashMap<u64, ElectionInfo>,
    pub failing_ids: HashSet<u64>,
    pub candidates: HashMap<u64, Vec<Candidate>>,
    pub latest_block: u64,
    pub created_events: Vec<EventRecord>,
    pub vote_events: Vec<EventRecord>,
    pub voted: Mutex<HashSet<(u64, String)>>,
    calls: Mutex<HashMap<String, usize>>,
}

impl MockContract {
    pub fn record(&self, call: &str) {
        let mut calls = self.calls.lock().unwrap();
        *calls.entry(call.to_string()).or_insert(0) += 1;
    }

    pub fn call_count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().get(call).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ElectionContract for MockContract {
    async fn next_election_id(&self) -> ChainResult<u64> {
        self.record("next_election_id");
        self.next_id.ok_or_else(|| {
            ChainError::new(ChainErrorKind::CounterUnreadable("rpc timeout".into()))
        })
    }

    async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo> {
        self.record(&format!("election_info_{election_id}"));
        if self.failing_ids.contains(&election_id) {
            return Err(ChainError::new(ChainErrorKind::Rpc("connection reset".into())));
        }
        self.elections
            .get(&election_id)
            .cloned()
            .ok_or_else(|| ChainError::new(ChainErrorKind::NoSuchElection(election_id)))
    }

    async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>> {
        self.record(&format!("candidates_{election_id}"));
        if self.failing_ids.contains(&election_id) {
            return Err(ChainError::new(ChainErrorKind::Rpc("connection reset".into())));
        }
        Ok(self.candidates.get(&election_id).cloned().unwrap_or_default())
    }

    async fn total_votes(&self, election_id: u64) -> ChainResult<u64> {
        self.record(&format!("total_votes_{election_id}"));
        let total = self
            .candidates
            .get(&election_id)
            .map(|c| c.iter().map(|c| *c.votes()).sum())
            .unwrap_or(0);
        Ok(total)
    }

    async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool> {
        self.record("has_voted");
        let voted = self.voted.lock().unwrap();
        Ok(voted.contains(&(election_id, voter.to_hex())))
    }

    async fn cast_vote(
        &self,
        election_id: u64,
        _candidate_index: u32,
        voter: &VoterHash,
    ) -> ChainResult<VoteReceipt> {
        self.record("cast_vote");
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
        Ok("0xadmin".to_string())
    }

    async fn latest_block(&self) -> ChainResult<u64> {
        self.record("latest_block");
        if self.latest_block == 0 {
            return Err(ChainError::new(ChainErrorKind::Rpc("provider down".into())));
        }
        Ok(self.latest_block)
    }

    async fn election_created_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        self.record("election_created_events");
        Ok(filter_events(&self.created_events, from_block, to_block))
    }

    async fn vote_cast_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>> {
        self.record("vote_cast_events");
        Ok(filter_events(&self.vote_events, from_block, to_block))
    }
}

fn filter_events(events: &[EventRecord], from_block: u64, to_block: u64) -> Vec<EventRecord> {
    events
        .iter()
        .filter(|e| (from_block..=to_block).contains(e.block_number()))
        .cloned()
        .collect()
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

/// A confirmed event in `block` at `now`.
pub fn event(hash: &str, block: u64, now: DateTime<Utc>) -> EventRecord {
    EventRecord::new(hash.to_string(), block, now, "0xsender".to_string(), true)
}
