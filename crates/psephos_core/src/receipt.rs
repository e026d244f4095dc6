//! Transaction receipts returned by contract writes.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Receipt for a confirmed vote transaction.
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder,
)]
pub struct VoteReceipt {
    /// Transaction hash on the chain
    transaction_hash: String,
    /// Election the vote was cast in
    election_id: u64,
    /// Sender address
    #[builder(default)]
    from: Option<String>,
    /// Contract address
    #[builder(default)]
    to: Option<String>,
    /// Block the transaction was mined in
    #[builder(default)]
    block_number: Option<u64>,
}
