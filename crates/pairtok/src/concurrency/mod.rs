//! # Concurrency Support
//!
//! Cooperative cancellation, input chunking, and thread sizing.

pub mod chunks;
pub mod threads;

mod cancellation;

#[doc(inline)]
pub use cancellation::{CancelScope, CancellationToken};
#[doc(inline)]
pub use chunks::{encode_chunks, split_into_chunks};
