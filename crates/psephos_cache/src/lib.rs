//! Short-TTL caching for read-mostly on-chain and off-chain lookups.
//!
//! This crate provides the in-memory cache that sits in front of contract
//! and registry reads, reducing redundant network calls within a TTL window.

#![warn(missing_docs)]

mod cache;

pub use cache::{CacheEntry, TtlCache};
