//! Vote submission and registration flows for the Psephos voting client.
//!
//! Every step of these flows is a suspension point on an external system:
//! identity checks hit the registry database, ballots come from the
//! contract, and the vote itself is a signed transaction the contract
//! confirms. The flows sequence those calls and map failures onto the error
//! taxonomy; they never retry on their own.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod admin;
mod flow;
mod registration;

pub use admin::AdminOps;
pub use flow::{Ballot, VoteFlow, VotingStep};
pub use registration::RegistrationFlow;

use psephos_error::VoteError;

/// Result type for flow operations.
pub type VoteResult<T> = std::result::Result<T, VoteError>;
