//! Contract gateway and election lookup for the Psephos voting client.
//!
//! The smart contract is an external, authoritative system; this crate owns
//! the client-side seam to it. [`ElectionContract`] abstracts the contract's
//! read and write methods, [`HttpContract`] implements it against a JSON
//! gateway, [`CachedContract`] adds short-TTL read caching, and
//! [`ElectionResolver`] walks election ids backwards to find the election
//! relevant to the current viewing context.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cached;
mod contract;
mod history;
mod http;
mod resolve;

pub use cached::CachedContract;
pub use contract::{ElectionContract, EventRecord};
pub use history::{CallMethod, ChainTransaction, HistoryReader, TransactionPage, TxStatus};
pub use http::HttpContract;
pub use resolve::{ElectionResolver, Resolution};

use psephos_error::ChainError;

/// Result type for contract gateway operations.
pub type ChainResult<T> = std::result::Result<T, ChainError>;
