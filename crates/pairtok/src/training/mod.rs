//! # Vocabulary Training
//!
//! Learning merge rules from a corpus, and building vocabularies from them.
//!
//! * [`PairEncoder::learn_merge_rules`](crate::encoders::PairEncoder::learn_merge_rules)
//!   runs greedy pair-merge learning against the encoder's own vocabulary.
//! * [`VocabularyBuilder`] wraps learning into a fresh [`Vocabulary`](crate::vocab::Vocabulary),
//!   with the configured special tokens registered.
//!
//! ```rust
//! use pairtok::{TokenizerOptions, training::VocabularyBuilder};
//!
//! let builder = VocabularyBuilder::new(TokenizerOptions::default());
//! let vocab = builder
//!     .build_from_corpus(["low lower", "lowest low"], 8)
//!     .unwrap();
//!
//! assert!(vocab.contains("lo"));
//! assert!(vocab.contains("<|endoftext|>"));
//! ```
//!
//! Learning recounts every adjacent pair after each merge, so its cost
//! grows with `corpus length * merges`. It is intended for small to
//! medium corpora.

mod merge_learning;
mod vocabulary_builder;

#[doc(inline)]
pub use vocabulary_builder::VocabularyBuilder;
