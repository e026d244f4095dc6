//! Core data types for the Psephos voting client.
//!
//! This crate provides the foundation data types shared across the Psephos
//! workspace: on-chain projections (elections, candidates, receipts), voter
//! registry records, and NIN hashing. All on-chain types are advisory,
//! read-only copies; the contract and the registry database remain the
//! sources of truth.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod candidate;
mod election;
mod nin;
mod receipt;
mod voter;

pub use candidate::{Candidate, winner};
pub use election::{ElectionInfo, ElectionInfoBuilder, ElectionStatus};
pub use nin::{Nin, NinHash, VoterHash};
pub use receipt::{VoteReceipt, VoteReceiptBuilder};
pub use voter::{AdminConfig, VoterRecord, VoterStatus};
