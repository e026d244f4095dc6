//! Election metadata projected from contract state.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Classification of an election relative to a point in time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ElectionStatus {
    /// Voting window is open and the contract reports the election active
    Active,
    /// Voting has not started yet
    Upcoming,
    /// Voting window has closed
    Completed,
    /// No election matches the viewing context
    Inactive,
}

/// Read-only projection of per-election contract state.
///
/// Never mutated locally. Copies held by the client are advisory and only
/// trusted within the TTL window of the cache that produced them.
///
/// # Examples
///
/// ```
/// use psephos_core::ElectionInfo;
/// use chrono::{TimeZone, Utc};
///
/// let info = ElectionInfo::new(
///     "General Election".to_string(),
///     Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 1, 20, 0, 0).unwrap(),
///     true,
///     4,
/// );
///
/// let noon = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
/// assert!(info.is_live_at(noon));
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_new::new,
    derive_builder::Builder,
)]
pub struct ElectionInfo {
    /// Election name as stored on chain
    name: String,
    /// Start of the voting window
    start_time: DateTime<Utc>,
    /// End of the voting window
    end_time: DateTime<Utc>,
    /// Contract-reported active flag
    active: bool,
    /// Number of candidates on the ballot
    candidate_count: u32,
}

impl ElectionInfo {
    /// Whether the voting window is open at `now` and the contract reports
    /// the election active.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time && self.active
    }

    /// Whether voting has not started yet at `now`.
    pub fn is_upcoming_at(&self, now: DateTime<Utc>) -> bool {
        now < self.start_time
    }

    /// Whether the voting window has closed at `now`.
    pub fn is_ended_at(&self, now: DateTime<Utc>) -> bool {
        now > self.end_time
    }

    /// Classify this election relative to `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> ElectionStatus {
        if self.is_live_at(now) {
            ElectionStatus::Active
        } else if self.is_upcoming_at(now) {
            ElectionStatus::Upcoming
        } else if self.is_ended_at(now) {
            ElectionStatus::Completed
        } else {
            // Inside the window but the contract flag is off.
            ElectionStatus::Inactive
        }
    }
}
