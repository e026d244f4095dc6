//! The seam to the external voting contract.

use crate::ChainResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use psephos_core::{Candidate, ElectionInfo, VoteReceipt, VoterHash};
use serde::{Deserialize, Serialize};

/// A creation or vote event emitted by the contract, enriched with its
/// transaction context.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct EventRecord {
    /// Transaction hash
    transaction_hash: String,
    /// Block the event was emitted in
    block_number: u64,
    /// Block timestamp
    timestamp: DateTime<Utc>,
    /// Sender address
    from: String,
    /// Whether the transaction was mined successfully
    confirmed: bool,
}

/// Read and write methods exposed by the pre-deployed voting contract.
///
/// The contract is the source of truth for all election state; duplicate-vote
/// protection is enforced there, keyed on the per-election voter hash. None
/// of the wire encoding lives on this side of the trait.
#[async_trait]
pub trait ElectionContract: Send + Sync {
    /// The contract's monotonically increasing election id counter.
    ///
    /// Ids below this value may or may not correspond to elections; the
    /// counter only bounds the scan.
    async fn next_election_id(&self) -> ChainResult<u64>;

    /// Metadata for one election.
    async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo>;

    /// The full candidate list with current tallies.
    async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>>;

    /// Total votes cast in one election.
    async fn total_votes(&self, election_id: u64) -> ChainResult<u64>;

    /// Whether this voter hash has already voted in the election.
    async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool>;

    /// Cast a vote. The wallet signature prompt and transaction confirmation
    /// happen behind this call; it returns once the transaction is mined.
    async fn cast_vote(
        &self,
        election_id: u64,
        candidate_index: u32,
        voter: &VoterHash,
    ) -> ChainResult<VoteReceipt>;

    /// The contract administrator's wallet address.
    async fn admin_address(&self) -> ChainResult<String>;

    /// The chain's latest block number, for history windowing.
    async fn latest_block(&self) -> ChainResult<u64>;

    /// `ElectionCreated` events within an inclusive block range.
    async fn election_created_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>>;

    /// `VoteCast` events within an inclusive block range.
    async fn vote_cast_events(
        &self,
        from_block: u64,
        to_block: u64,
    ) -> ChainResult<Vec<EventRecord>>;
}

macro_rules! delegate_contract {
    ($ty:ty) => {
        #[async_trait]
        impl<C: ElectionContract + ?Sized> ElectionContract for $ty {
            async fn next_election_id(&self) -> ChainResult<u64> {
                (**self).next_election_id().await
            }
            async fn election_info(&self, election_id: u64) -> ChainResult<ElectionInfo> {
                (**self).election_info(election_id).await
            }
            async fn candidates(&self, election_id: u64) -> ChainResult<Vec<Candidate>> {
                (**self).candidates(election_id).await
            }
            async fn total_votes(&self, election_id: u64) -> ChainResult<u64> {
                (**self).total_votes(election_id).await
            }
            async fn has_voted(&self, election_id: u64, voter: &VoterHash) -> ChainResult<bool> {
                (**self).has_voted(election_id, voter).await
            }
            async fn cast_vote(
                &self,
                election_id: u64,
                candidate_index: u32,
                voter: &VoterHash,
            ) -> ChainResult<VoteReceipt> {
                (**self).cast_vote(election_id, candidate_index, voter).await
            }
            async fn admin_address(&self) -> ChainResult<String> {
                (**self).admin_address().await
            }
            async fn latest_block(&self) -> ChainResult<u64> {
                (**self).latest_block().await
            }
            async fn election_created_events(
                &self,
                from_block: u64,
                to_block: u64,
            ) -> ChainResult<Vec<EventRecord>> {
                (**self).election_created_events(from_block, to_block).await
            }
            async fn vote_cast_events(
                &self,
                from_block: u64,
                to_block: u64,
            ) -> ChainResult<Vec<EventRecord>> {
                (**self).vote_cast_events(from_block, to_block).await
            }
        }
    };
}

delegate_contract!(&C);
delegate_contract!(std::sync::Arc<C>);
