//! NIN registration flow.

use crate::VoteResult;
use psephos_core::{Nin, VoterRecord};
use psephos_database::VoterRegistry;
use psephos_error::{VoteError, VoteErrorKind};
use tracing::{info, instrument};

/// Registers wallet/NIN pairs ahead of an election.
///
/// Validation runs in a fixed order: format checks first (no external
/// calls), then the lock flag, then both duplicate checks against the
/// registry. Each rejection maps to its own error so the caller can show a
/// specific message.
#[derive(derive_new::new)]
pub struct RegistrationFlow<R> {
    registry: R,
}

impl<R: VoterRegistry> RegistrationFlow<R> {
    /// Register a NIN for a wallet.
    #[instrument(skip(self, nin))]
    pub async fn register(&self, wallet_address: &str, nin: &str) -> VoteResult<VoterRecord> {
        let nin = Nin::parse(nin).ok_or_else(|| VoteError::new(VoteErrorKind::InvalidNin))?;
        let wallet_address = wallet_address.trim();
        if wallet_address.is_empty() {
            return Err(VoteError::new(VoteErrorKind::InvalidWallet(
                "empty address".to_string(),
            )));
        }

        if self.registry.submission_locked().await? {
            return Err(VoteError::new(VoteErrorKind::RegistrationLocked));
        }

        if self.registry.find_by_wallet(wallet_address).await?.is_some() {
            return Err(VoteError::new(VoteErrorKind::AlreadyRegistered));
        }

        if self.registry.find_by_nin(nin.as_str()).await?.is_some() {
            return Err(VoteError::new(VoteErrorKind::NinClaimed));
        }

        let record = self.registry.insert_voter(wallet_address, nin.as_str()).await?;
        info!(wallet = %record.wallet_address(), "Registration accepted");
        Ok(record)
    }

    /// The wrapped registry, for callers that need direct reads.
    pub fn registry(&self) -> &R {
        &self.registry
    }
}
