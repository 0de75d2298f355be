//! Caching subsystem.
//!
//! - [`CacheKey`]: request identity derived from an operation and its
//!   normalized arguments.
//! - [`ResponseCache`]: typed key→value store with lazy TTL expiry,
//!   shared by every fetch operation of a [`NewsClient`](crate::NewsClient).
//!   See [`response`] module docs for the expiry model.

pub mod key;
pub mod response;

pub use key::CacheKey;
pub use response::{CacheConfig, Cacheable, CachedValue, ResponseCache};
