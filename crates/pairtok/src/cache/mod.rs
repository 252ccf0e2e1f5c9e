//! # Token Cache
//!
//! [`TokenCache`] memoizes whole-input encodings with a bounded,
//! least-frequently-used eviction policy.

mod token_cache;

#[doc(inline)]
pub use token_cache::TokenCache;
