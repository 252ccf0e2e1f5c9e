//! # Vocabulary
//!
//! This module provides the vocabulary store and related io mechanisms.
//!
//! * [`Vocabulary`] - the mutable, shared ``{ value <-> id }`` store
//!   plus the ordered merge-rule list.
//! * [`FrozenVocab`] - an immutable snapshot of a [`Vocabulary`].
//! * [`TokenVocab`] - the read-only interface both implement.
//! * [`io`] - the flat JSON persistence format.

pub mod io;

mod frozen_vocab;
mod token_types;
mod token_vocab;
mod vocabulary;

#[doc(inline)]
pub use frozen_vocab::FrozenVocab;
#[doc(inline)]
pub use token_types::{MergeRule, Token, TokenPair};
#[doc(inline)]
pub use token_vocab::{TokenMap, TokenVocab};
#[doc(inline)]
pub use vocabulary::Vocabulary;
