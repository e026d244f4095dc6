//! Psephos - Blockchain Voting Client
//!
//! Psephos is a client library for a pre-deployed voting smart contract with
//! an off-chain voter registry. It resolves which election is live by
//! scanning the contract's election counter backward, caches contract reads
//! with per-key time-to-live budgets, and drives registration and vote
//! submission as explicit multi-step flows.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use psephos::{
//!     CachedContract, ElectionResolver, HttpContract, PsephosConfig, Resolution, TtlCache,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     psephos::init_telemetry()?;
//!     let config = PsephosConfig::load()?;
//!
//!     let contract = HttpContract::new(
//!         config.chain.gateway_url.clone(),
//!         config.chain.contract_address.clone(),
//!     );
//!     let contract = CachedContract::new(contract, TtlCache::new());
//!
//!     let resolver = ElectionResolver::new(&contract);
//!     match resolver.resolve().await {
//!         Resolution::Active { id, info } => println!("election {id} is live: {}", info.name()),
//!         Resolution::Upcoming { id, .. } => println!("election {id} has not opened yet"),
//!         Resolution::Inactive => println!("no election"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Psephos is organized as a workspace with focused crates:
//!
//! - `psephos_core` - Domain types (elections, candidates, NIN hashing)
//! - `psephos_error` - Error types
//! - `psephos_cache` - TTL cache for contract reads
//! - `psephos_chain` - Contract seam, caching decorator, election resolution
//! - `psephos_database` - PostgreSQL voter registry
//! - `psephos_vote` - Registration, vote, and admin flows
//!
//! This crate (`psephos`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod telemetry;

pub use config::{ChainConfig, DatabaseConfig, PsephosConfig};
pub use telemetry::init_telemetry;

pub use psephos_cache::*;
pub use psephos_chain::*;
pub use psephos_core::*;
pub use psephos_database::*;
pub use psephos_error::*;
pub use psephos_vote::*;
