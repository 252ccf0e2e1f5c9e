//! # Encoders
//!
//! [`PairEncoder`] turns text into [`Token`](crate::vocab::Token) sequences:
//! * initial segmentation into text elements (see [`crate::segmentation`]),
//! * greedy application of the vocabulary's merge rules.
//!
//! Learning new merge rules lives in [`crate::training`].

pub mod pair_frequency;

mod pair_encoder;

#[doc(inline)]
pub use pair_encoder::PairEncoder;
