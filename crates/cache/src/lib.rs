//! # Classboard Cache Crate
//!
//! A read-through cache for read-heavy, rarely-changing lookups. Callers
//! derive a key from the logical operation and its arguments, consult the
//! store before the database, and write results back with a fixed TTL.
//!
//! ## Architectural Principles
//!
//! - **Cache-aside:** application code populates the cache on miss; the
//!   store itself never talks to the database.
//! - **TTL-bounded staleness:** entries expire passively. There is no
//!   write-side invalidation, so a cached read may lag a concurrent commit
//!   by at most the TTL.
//! - **Never load-bearing:** a failing or misbehaving store degrades reads
//!   to the database; it can make a request slower, never wrong.
//!
//! ## Public API
//!
//! - `build_key`: deterministic key derivation from operation + arguments.
//! - `CacheStore`: the async store trait, with `MemoryCache` and `NoopCache`
//!   implementations.
//! - `fetch_or_load`: the read-through helper used by every cached read.
//! - `CacheError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod key;
pub mod read_through;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::CacheError;
pub use key::build_key;
pub use read_through::fetch_or_load;
pub use store::{CacheStore, MemoryCache, NoopCache};
