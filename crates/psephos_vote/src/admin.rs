//! Administrative operations spanning the contract and the registry.

use crate::VoteResult;
use psephos_chain::{ElectionContract, ElectionResolver, Resolution};
use psephos_database::VoterRegistry;
use psephos_error::VoteError;
use tracing::{debug, info, instrument};

/// Admin-side coordination between on-chain state and the registry.
#[derive(derive_new::new)]
pub struct AdminOps<C, R> {
    contract: C,
    registry: R,
}

impl<C: ElectionContract, R: VoterRegistry> AdminOps<C, R> {
    /// Whether a wallet is the contract administrator.
    #[instrument(skip(self))]
    pub async fn is_admin(&self, wallet_address: &str) -> VoteResult<bool> {
        let admin = self.contract.admin_address().await.map_err(VoteError::from)?;
        Ok(admin.eq_ignore_ascii_case(wallet_address.trim()))
    }

    /// Lock NIN submissions if an election is currently active.
    ///
    /// Returns whether submissions ended up locked. Already-locked state is
    /// left alone; no election means no change.
    #[instrument(skip(self))]
    pub async fn auto_lock_for_active_election(&self, admin_address: &str) -> VoteResult<bool> {
        let resolver = ElectionResolver::new(&self.contract);
        let active = matches!(resolver.resolve().await, Resolution::Active { .. });
        if !active {
            debug!("No active election, leaving submission lock unchanged");
            return self.registry.submission_locked().await.map_err(VoteError::from);
        }

        if self.registry.submission_locked().await? {
            debug!("Submissions already locked");
            return Ok(true);
        }

        self.registry.set_submission_lock(true, admin_address).await?;
        info!("Locked NIN submissions for active election");
        Ok(true)
    }

    /// Reset every voter's status ahead of a newly created election.
    ///
    /// Returns the number of voters reset.
    #[instrument(skip(self))]
    pub async fn reset_for_new_election(&self) -> VoteResult<usize> {
        let reset = self.registry.reset_all_statuses().await?;
        info!(reset, "Voter statuses reset for new election");
        Ok(reset)
    }
}
