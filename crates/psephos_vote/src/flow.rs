//! The three-step vote submission flow.

use crate::VoteResult;
use derive_getters::Getters;
use psephos_chain::{ElectionContract, ElectionResolver, Resolution};
use psephos_core::{Candidate, ElectionInfo, Nin, NinHash, VoteReceipt, VoterStatus};
use psephos_database::VoterRegistry;
use psephos_error::{ChainErrorKind, VoteError, VoteErrorKind};
use tracing::{debug, info, instrument, warn};

/// Position in the vote submission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum VotingStep {
    /// Awaiting identity verification
    #[display("NIN entry")]
    NinEntry,
    /// Identity verified, awaiting candidate choice
    #[display("candidate selection")]
    CandidateSelection,
    /// Vote confirmed on chain
    #[display("transaction confirmation")]
    TransactionConfirmation,
}

/// The ballot presented during candidate selection.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Ballot {
    /// Election being voted in
    election_id: u64,
    /// Election metadata
    info: ElectionInfo,
    /// Candidates in ballot order
    candidates: Vec<Candidate>,
}

struct VerifiedIdentity {
    wallet_address: String,
    nin_hash: NinHash,
}

/// Drives one voter through `NinEntry -> CandidateSelection ->
/// TransactionConfirmation`.
///
/// Each transition waits on an external confirmation: the registry for the
/// identity check, the contract for the ballot and the signed vote
/// transaction, and the registry again for the status write-back. Duplicate
/// votes are ultimately enforced by the contract; this flow re-queries state
/// before submitting so the voter gets a specific message instead of a
/// revert.
///
/// A failed operation leaves the flow in its current step so the caller can
/// re-trigger it manually; nothing here retries.
pub struct VoteFlow<C, R> {
    contract: C,
    registry: R,
    step: VotingStep,
    identity: Option<VerifiedIdentity>,
    ballot: Option<Ballot>,
    receipt: Option<VoteReceipt>,
}

impl<C: ElectionContract, R: VoterRegistry> VoteFlow<C, R> {
    /// Start a new flow at the NIN entry step.
    pub fn new(contract: C, registry: R) -> Self {
        Self {
            contract,
            registry,
            step: VotingStep::NinEntry,
            identity: None,
            ballot: None,
            receipt: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> VotingStep {
        self.step
    }

    /// The receipt, once the vote is confirmed.
    pub fn receipt(&self) -> Option<&VoteReceipt> {
        self.receipt.as_ref()
    }

    fn require_step(&self, expected: VotingStep) -> VoteResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(VoteError::new(VoteErrorKind::WrongStep(self.step.to_string())))
        }
    }

    /// Verify the voter's identity against the registry.
    ///
    /// Validation failures (malformed NIN, empty wallet) are caught before
    /// any external call. On success the flow advances to candidate
    /// selection.
    #[instrument(skip(self, nin))]
    pub async fn verify_identity(&mut self, wallet_address: &str, nin: &str) -> VoteResult<()> {
        self.require_step(VotingStep::NinEntry)?;

        let nin = Nin::parse(nin).ok_or_else(|| VoteError::new(VoteErrorKind::InvalidNin))?;
        let wallet_address = wallet_address.trim();
        if wallet_address.is_empty() {
            return Err(VoteError::new(VoteErrorKind::InvalidWallet(
                "empty address".to_string(),
            )));
        }

        let record = self
            .registry
            .find_by_wallet(wallet_address)
            .await?
            .ok_or_else(|| VoteError::new(VoteErrorKind::NotRegistered))?;

        if record.nin() != nin.as_str() {
            return Err(VoteError::new(VoteErrorKind::IdentityMismatch));
        }
        if *record.status() == VoterStatus::Voted {
            return Err(VoteError::new(VoteErrorKind::AlreadyVoted));
        }

        info!(wallet = %record.wallet_address(), "Voter identity verified");
        self.identity = Some(VerifiedIdentity {
            wallet_address: record.wallet_address().clone(),
            nin_hash: nin.hash(),
        });
        self.step = VotingStep::CandidateSelection;
        Ok(())
    }

    /// Resolve the active election and fetch its ballot.
    ///
    /// Only valid during candidate selection. Returns
    /// [`VoteErrorKind::NoActiveElection`] when resolution finds nothing to
    /// vote in.
    #[instrument(skip(self))]
    pub async fn load_ballot(&mut self) -> VoteResult<&Ballot> {
        self.require_step(VotingStep::CandidateSelection)?;

        let resolver = ElectionResolver::new(&self.contract);
        let (election_id, info) = match resolver.resolve().await {
            Resolution::Active { id, info } => (id, info),
            _ => return Err(VoteError::new(VoteErrorKind::NoActiveElection)),
        };

        let candidates = self.contract.candidates(election_id).await.map_err(VoteError::from)?;
        debug!(election_id, candidates = candidates.len(), "Loaded ballot");

        Ok(self.ballot.insert(Ballot {
            election_id,
            info,
            candidates,
        }))
    }

    /// Cast the vote and write the voter's status back to the registry.
    ///
    /// The candidate index is checked against the loaded ballot, then the
    /// duplicate-vote flag is re-queried from the contract before
    /// submitting. A write-back failure after a confirmed vote is logged
    /// rather than surfaced: the chain, not the registry flag, is
    /// authoritative.
    #[instrument(skip(self))]
    pub async fn submit(&mut self, candidate_index: u32) -> VoteResult<&VoteReceipt> {
        self.require_step(VotingStep::CandidateSelection)?;
        let ballot = self
            .ballot
            .as_ref()
            .ok_or_else(|| VoteError::new(VoteErrorKind::WrongStep("ballot not loaded".to_string())))?;
        let identity = self
            .identity
            .as_ref()
            .ok_or_else(|| VoteError::new(VoteErrorKind::WrongStep("identity not verified".to_string())))?;

        let count = ballot.candidates.len() as u32;
        if candidate_index >= count {
            return Err(VoteError::new(VoteErrorKind::UnknownCandidate {
                index: candidate_index,
                count,
            }));
        }

        let election_id = ballot.election_id;
        let voter_hash = identity.nin_hash.voter_hash(election_id);

        // Pre-check, so a duplicate gets a specific message. If the check
        // itself fails the contract still enforces uniqueness on submit.
        match self.contract.has_voted(election_id, &voter_hash).await {
            Ok(true) => return Err(VoteError::new(VoteErrorKind::AlreadyVoted)),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Duplicate-vote pre-check failed, submitting anyway"),
        }

        let receipt = self
            .contract
            .cast_vote(election_id, candidate_index, &voter_hash)
            .await
            .map_err(|e| {
                if let ChainErrorKind::Revert(reason) = &e.kind
                    && reason.contains("already voted")
                {
                    VoteError::new(VoteErrorKind::AlreadyVoted)
                } else {
                    VoteError::from(e)
                }
            })?;
        info!(election_id, hash = %receipt.transaction_hash(), "Vote confirmed");

        if let Err(e) = self
            .registry
            .set_status(&identity.wallet_address, VoterStatus::Voted)
            .await
        {
            warn!(error = %e, "Vote confirmed but status write-back failed");
        }

        self.step = VotingStep::TransactionConfirmation;
        Ok(self.receipt.insert(receipt))
    }
}
