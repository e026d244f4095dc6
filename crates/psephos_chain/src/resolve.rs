//! Backward-scan election resolution.

use crate::ElectionContract;
use chrono::{DateTime, Utc};
use psephos_core::ElectionInfo;
use tracing::{debug, instrument, warn};

/// The single election relevant to the current viewing context.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// An election whose voting window is open right now
    Active {
        /// Election id
        id: u64,
        /// Election metadata
        info: ElectionInfo,
    },
    /// No open election, but one is scheduled to start
    Upcoming {
        /// Election id
        id: u64,
        /// Election metadata
        info: ElectionInfo,
    },
    /// Neither an open nor a scheduled election was found
    Inactive,
}

/// Locates the most relevant election by scanning ids downward from the
/// contract's id counter.
///
/// The scan is O(n) in the number of elections ever created, mitigated by
/// putting a [`crate::CachedContract`] underneath. Per-id fetch failures are
/// skipped; a failure to read the counter itself degrades to
/// [`Resolution::Inactive`] rather than surfacing an error.
///
/// The retained Upcoming candidate is the first one encountered going
/// downward, i.e. the most recently created future election, not necessarily
/// the one starting soonest. That matches the deployed behavior this client
/// pairs with; changing it would change which election the dashboard
/// advertises.
#[derive(Debug, derive_new::new)]
pub struct ElectionResolver<C> {
    contract: C,
}

impl<C: ElectionContract> ElectionResolver<C> {
    /// Resolve against the wall clock.
    pub async fn resolve(&self) -> Resolution {
        self.resolve_at(Utc::now()).await
    }

    /// Resolve against an explicit point in time.
    #[instrument(skip(self))]
    pub async fn resolve_at(&self, now: DateTime<Utc>) -> Resolution {
        let next_id = match self.contract.next_election_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Election id counter unreadable, reporting inactive");
                return Resolution::Inactive;
            }
        };

        if next_id <= 1 {
            debug!(next_id, "No elections created yet");
            return Resolution::Inactive;
        }

        let mut upcoming: Option<(u64, ElectionInfo)> = None;

        for id in (1..next_id).rev() {
            let info = match self.contract.election_info(id).await {
                Ok(info) => info,
                Err(e) => {
                    debug!(id, error = %e, "Skipping unreadable election");
                    continue;
                }
            };

            if info.is_live_at(now) {
                debug!(id, name = %info.name(), "Found active election");
                return Resolution::Active { id, info };
            }

            if upcoming.is_none() && info.is_upcoming_at(now) {
                debug!(id, name = %info.name(), "Found upcoming election candidate");
                // Keep scanning: an active election at a lower id still wins.
                upcoming = Some((id, info));
            }
        }

        match upcoming {
            Some((id, info)) => Resolution::Upcoming { id, info },
            None => {
                debug!("No active or upcoming election");
                Resolution::Inactive
            }
        }
    }

    /// The most recently created election whose voting window has closed,
    /// for last-winner views.
    #[instrument(skip(self))]
    pub async fn last_completed_at(&self, now: DateTime<Utc>) -> Option<(u64, ElectionInfo)> {
        let next_id = self.contract.next_election_id().await.ok()?;
        self.completed_below(next_id, now).await
    }

    /// The highest-id completed election strictly below `below_id`, for
    /// paging through previous elections.
    pub async fn completed_below(
        &self,
        below_id: u64,
        now: DateTime<Utc>,
    ) -> Option<(u64, ElectionInfo)> {
        for id in (1..below_id).rev() {
            match self.contract.election_info(id).await {
                Ok(info) if info.is_ended_at(now) => return Some((id, info)),
                Ok(_) => {}
                Err(e) => {
                    debug!(id, error = %e, "Skipping unreadable election");
                }
            }
        }
        None
    }

    /// The wrapped contract, for callers that need direct reads.
    pub fn contract(&self) -> &C {
        &self.contract
    }
}
