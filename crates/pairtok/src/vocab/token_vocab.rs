//! # Token Vocabulary Index

use std::{collections::BTreeMap, path::Path};

use compact_str::CompactString;

use crate::{
    errors::TokResult,
    types::TokenId,
    vocab::{Token, Vocabulary, io::save_json_token_map_path},
};

/// A sorted ``{ value -> id }`` snapshot of a vocabulary.
pub type TokenMap = BTreeMap<CompactString, TokenId>;

/// Read-only view shared by all vocabulary implementations.
pub trait TokenVocab: Send + Sync {
    /// Returns the number of distinct tokens.
    fn len(&self) -> usize;

    /// Returns true if the vocabulary is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is `value` registered? The empty string never is.
    fn contains(
        &self,
        value: &str,
    ) -> bool {
        !value.is_empty() && self.try_get_id(value).is_some()
    }

    /// Look up the id of a token value.
    fn try_get_id(
        &self,
        value: &str,
    ) -> Option<TokenId>;

    /// Look up the token registered under an id.
    fn try_get_token(
        &self,
        id: TokenId,
    ) -> Option<Token>;

    /// Snapshot the ``{ value -> id }`` mapping.
    fn to_token_map(&self) -> TokenMap;

    /// Save the ``{ value -> id }`` mapping as a JSON document.
    ///
    /// Merge rules and special flags are not persisted.
    fn save(
        &self,
        path: &Path,
    ) -> TokResult<()> {
        save_json_token_map_path(&self.to_token_map(), path)
    }

    /// Downcast to the mutable [`Vocabulary`], if that is what this is.
    fn as_vocabulary(&self) -> Option<&Vocabulary> {
        None
    }
}
