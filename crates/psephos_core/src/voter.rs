//! Voter registry records.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Whether a registered voter has cast a ballot in the current election.
///
/// Stored in the registry as `'Y'`/`'N'` and reset to `'N'` whenever a new
/// election is created.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum VoterStatus {
    /// Has voted in the current election
    #[serde(rename = "Y")]
    #[display("Y")]
    Voted,
    /// Has not voted in the current election
    #[serde(rename = "N")]
    #[display("N")]
    NotVoted,
}

impl VoterStatus {
    /// Database column representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            VoterStatus::Voted => "Y",
            VoterStatus::NotVoted => "N",
        }
    }

    /// Parse the database column representation.
    ///
    /// Anything other than `'Y'` is treated as not voted, matching how the
    /// original flag was read.
    pub fn from_flag(flag: &str) -> Self {
        if flag == "Y" {
            VoterStatus::Voted
        } else {
            VoterStatus::NotVoted
        }
    }
}

/// A row in the `users` table: one registered voter.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct VoterRecord {
    /// Wallet address, stored lowercase for case-insensitive lookup
    wallet_address: String,
    /// Registered National Identification Number
    nin: String,
    /// Vote status for the current election
    status: VoterStatus,
    /// When the registration was created
    created_at: DateTime<Utc>,
}

/// The single-row `admin_config` table.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new,
)]
pub struct AdminConfig {
    /// Row id
    id: i32,
    /// Administrator wallet address
    admin_address: String,
    /// Whether NIN submissions are locked
    locked: bool,
}
