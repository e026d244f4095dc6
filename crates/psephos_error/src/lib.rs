//! Error types for the Psephos voting client.
//!
//! This crate provides the foundation error types used throughout the Psephos
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use psephos_error::{PsephosResult, ChainError, ChainErrorKind};
//!
//! fn fetch_data() -> PsephosResult<String> {
//!     Err(ChainError::new(ChainErrorKind::Rpc("connection refused".into())))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod config;
mod error;
mod registry;
mod vote;

pub use chain::{ChainError, ChainErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{PsephosError, PsephosErrorKind, PsephosResult};
pub use registry::{RegistryError, RegistryErrorKind};
pub use vote::{VoteError, VoteErrorKind};
