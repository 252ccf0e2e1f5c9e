//! # `pairtok` Byte-Pair Tokenizer
//!
//! A Byte-Pair-Encoding tokenizer which learns its merge rules from a
//! corpus, over grapheme-cluster text elements.
//!
//! See:
//! * [`vocab`] for the shared ``{ value <-> id }`` store and its JSON format.
//! * [`encoders`] to segment text and apply merge rules.
//! * [`training`] to learn merge rules and build vocabularies.
//! * [`cache`] for the LFU token cache.
//! * [`tokenizer`] for the request orchestrator: limits, chunking,
//!   timeouts, caching and metrics.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//! See ``types::PTHashMap``.
//!
//! #### feature: ``rayon``
//!
//! Long inputs are chunked and the chunks are encoded on the ``rayon`` pool.
//! Without it, the same chunks are encoded sequentially; results are identical.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//!
//! ## Example
//!
//! ```rust
//! use pairtok::{CancellationToken, Tokenizer, TokenizerOptions};
//!
//! let tokenizer = Tokenizer::new(TokenizerOptions::default()).unwrap();
//! tokenizer
//!     .train(["the cat", "the hat", "the mat"], 4)
//!     .unwrap();
//!
//! let tokens = tokenizer.encode("the bat").unwrap();
//! assert_eq!(tokens[0].value(), "the ");
//! assert_eq!(tokenizer.decode(&tokens).unwrap(), "the bat");
//!
//! let cancel = CancellationToken::new();
//! let progress = tokenizer
//!     .encode_stream(["a", "bc"], &cancel, |_tokens, _progress| {})
//!     .unwrap();
//! assert_eq!(progress.processed_tokens, 3);
//! ```
#![warn(missing_docs, unused)]

pub mod cache;
pub mod concurrency;
pub mod encoders;
pub mod errors;
pub mod metrics;
pub mod segmentation;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use concurrency::CancellationToken;
#[doc(inline)]
pub use errors::{TokResult, TokenizerError};
#[doc(inline)]
pub use tokenizer::{TokenizationProgress, Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenId;
#[doc(inline)]
pub use vocab::{Token, Vocabulary};
