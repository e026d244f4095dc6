//! PostgreSQL voter registry for the Psephos voting client.
//!
//! The registry holds what never belongs on chain: the mapping from wallet
//! addresses to National Identification Numbers, each voter's vote-status
//! flag, and the single-row admin configuration that locks registrations
//! during elections. The database is external and authoritative; this crate
//! is a thin diesel layer over it with no migration logic.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod models;
mod registry;

// Public for external queries against the same database.
pub mod schema;

pub use connection::establish_connection;
pub use models::{AdminConfigRow, NewAdminConfigRow, NewUserRow, UserRow};
pub use registry::{PgVoterRegistry, VoterRegistry};

use psephos_error::RegistryError;

/// Result type for registry operations.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;
