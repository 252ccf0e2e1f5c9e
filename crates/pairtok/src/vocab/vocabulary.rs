//! # Vocabulary Store
//!
//! The ``{ value <-> id }`` bijection and the ordered merge-rule list.
//!
//! Both maps live under one [`RwLock`], so a reader either sees a value
//! fully registered (in both directions) or not at all. Ids come from
//! a counter which only moves forward, including across [`Vocabulary::load`].

use std::path::Path;

use compact_str::CompactString;
use parking_lot::{Mutex, RwLock};

use crate::{
    errors::{TokResult, TokenizerError},
    types::{TokenId, PTHashMap, hash_map_with_capacity},
    vocab::{
        FrozenVocab,
        MergeRule,
        Token,
        TokenMap,
        TokenVocab,
        io::{load_json_token_map_path, save_json_token_map_path},
    },
};

#[derive(Debug, Default)]
struct VocabState {
    token_to_id: PTHashMap<CompactString, TokenId>,
    id_to_token: PTHashMap<TokenId, Token>,

    /// Kept wider than [`TokenId`] so exhaustion is detectable.
    next_id: u64,
}

impl VocabState {
    fn get(
        &self,
        value: &str,
    ) -> Option<&Token> {
        self.token_to_id
            .get(value)
            .and_then(|id| self.id_to_token.get(id))
    }

    fn allocate_id(&mut self) -> TokResult<TokenId> {
        let id = TokenId::try_from(self.next_id).map_err(|_| {
            TokenizerError::VocabSizeOverflow {
                size: self.next_id as usize + 1,
            }
        })?;
        self.next_id += 1;
        Ok(id)
    }
}

/// The mutable, shareable vocabulary store.
///
/// All methods take `&self`; share it as `Arc<Vocabulary>`.
#[derive(Debug, Default)]
pub struct Vocabulary {
    state: RwLock<VocabState>,
    merge_rules: Mutex<Vec<MergeRule>>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of distinct tokens.
    pub fn len(&self) -> usize {
        self.state.read().token_to_id.len()
    }

    /// Returns true if no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is `value` registered? The empty string never is.
    pub fn contains(
        &self,
        value: &str,
    ) -> bool {
        !value.is_empty() && self.state.read().token_to_id.contains_key(value)
    }

    /// Look up the id of a token value.
    pub fn try_get_id(
        &self,
        value: &str,
    ) -> Option<TokenId> {
        if value.is_empty() {
            return None;
        }
        self.state.read().token_to_id.get(value).copied()
    }

    /// Look up the token registered under an id.
    pub fn try_get_token(
        &self,
        id: TokenId,
    ) -> Option<Token> {
        self.state.read().id_to_token.get(&id).cloned()
    }

    /// Look up the full token for a value, under a single read lock.
    pub fn get_token(
        &self,
        value: &str,
    ) -> Option<Token> {
        self.state.read().get(value).cloned()
    }

    /// Register a token value, returning its id.
    ///
    /// Idempotent: an existing value returns its existing id, and
    /// its special flag is left untouched.
    ///
    /// ## Arguments
    /// * `value` - the token text; must be non-empty.
    /// * `is_special` - the special flag for a newly created token.
    ///
    /// ## Returns
    /// The token id, or [`TokenizerError::InvalidInput`] for an empty value.
    pub fn add_token(
        &self,
        value: &str,
        is_special: bool,
    ) -> TokResult<TokenId> {
        self.get_or_add_token(value, is_special)
            .map(|token| token.id())
    }

    /// Register a token value, returning the full token.
    ///
    /// See [`Vocabulary::add_token`].
    pub fn get_or_add_token(
        &self,
        value: &str,
        is_special: bool,
    ) -> TokResult<Token> {
        if value.is_empty() {
            return Err(TokenizerError::InvalidInput(
                "token value must be non-empty".to_string(),
            ));
        }

        if let Some(token) = self.state.read().get(value) {
            return Ok(token.clone());
        }

        let mut state = self.state.write();
        // Another writer may have won between the locks.
        if let Some(token) = state.get(value) {
            return Ok(token.clone());
        }

        let id = state.allocate_id()?;
        let token = Token::new(value, id, is_special);
        state.token_to_id.insert(CompactString::from(value), id);
        state.id_to_token.insert(id, token.clone());
        Ok(token)
    }

    /// Register `value` as a special token.
    ///
    /// If `value` is already present as a normal token, its flag is
    /// switched to special in place; the id does not change.
    pub fn register_special(
        &self,
        value: &str,
    ) -> TokResult<TokenId> {
        let token = self.get_or_add_token(value, true)?;
        if token.is_special() {
            return Ok(token.id());
        }

        let mut state = self.state.write();
        if let Some(existing) = state.id_to_token.get_mut(&token.id()) {
            *existing = existing.to_special();
        }
        Ok(token.id())
    }

    /// A copy of the ordered merge-rule list.
    pub fn merge_rules(&self) -> Vec<MergeRule> {
        self.merge_rules.lock().clone()
    }

    /// The number of registered merge rules.
    pub fn merge_rule_count(&self) -> usize {
        self.merge_rules.lock().len()
    }

    /// Append a merge rule.
    pub fn add_merge_rule(
        &self,
        rule: MergeRule,
    ) {
        self.merge_rules.lock().push(rule);
    }

    /// Remove every merge rule.
    pub fn clear_merge_rules(&self) {
        self.merge_rules.lock().clear();
    }

    /// Snapshot the ``{ value -> id }`` mapping.
    pub fn to_token_map(&self) -> TokenMap {
        self.state
            .read()
            .token_to_id
            .iter()
            .map(|(value, &id)| (value.clone(), id))
            .collect()
    }

    /// Take an immutable, lock-free snapshot.
    pub fn freeze(&self) -> FrozenVocab {
        let state = self.state.read();
        FrozenVocab::new(state.token_to_id.clone(), state.id_to_token.clone())
    }

    /// Replace every token with the contents of `token_map`.
    ///
    /// The map is validated completely before anything is replaced;
    /// all loaded tokens are non-special. Merge rules are untouched.
    ///
    /// ## Returns
    /// [`TokenizerError::Corrupt`] if two values share one id.
    pub fn replace_tokens(
        &self,
        token_map: TokenMap,
    ) -> TokResult<()> {
        let mut token_to_id: PTHashMap<CompactString, TokenId> =
            hash_map_with_capacity(token_map.len());
        let mut id_to_token: PTHashMap<TokenId, Token> = hash_map_with_capacity(token_map.len());
        let mut max_id: Option<TokenId> = None;

        for (value, id) in token_map {
            if value.is_empty() {
                continue;
            }
            if let Some(other) = id_to_token.get(&id) {
                return Err(TokenizerError::Corrupt(format!(
                    "id {id} is assigned to both {:?} and {:?}",
                    other.value(),
                    value.as_str()
                )));
            }
            max_id = max_id.max(Some(id));
            id_to_token.insert(id, Token::new(value.clone(), id, false));
            token_to_id.insert(value, id);
        }

        let mut state = self.state.write();
        let floor = max_id.map(|id| id as u64 + 1).unwrap_or(0);
        state.next_id = state.next_id.max(floor);
        state.token_to_id = token_to_id;
        state.id_to_token = id_to_token;
        Ok(())
    }

    /// Save the ``{ value -> id }`` mapping as a JSON document.
    ///
    /// Merge rules and special flags are not persisted.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TokResult<()> {
        let path = path.as_ref();
        let token_map = self.to_token_map();
        save_json_token_map_path(&token_map, path)?;
        log::info!(
            "saved vocabulary ({} tokens) to {}",
            token_map.len(),
            path.display()
        );
        Ok(())
    }

    /// Replace the vocabulary with a saved JSON document.
    ///
    /// ## Returns
    /// * [`TokenizerError::NotFound`] if `path` does not exist.
    /// * [`TokenizerError::Corrupt`] if the document is not a ``{ string: id }`` map.
    ///
    /// On error the current vocabulary is left unchanged.
    pub fn load<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TokResult<()> {
        let path = path.as_ref();
        let token_map = load_json_token_map_path(path)?;
        let count = token_map.len();
        self.replace_tokens(token_map)?;
        log::info!("loaded vocabulary ({count} tokens) from {}", path.display());
        Ok(())
    }
}

impl TokenVocab for Vocabulary {
    fn len(&self) -> usize {
        Vocabulary::len(self)
    }

    fn contains(
        &self,
        value: &str,
    ) -> bool {
        Vocabulary::contains(self, value)
    }

    fn try_get_id(
        &self,
        value: &str,
    ) -> Option<TokenId> {
        Vocabulary::try_get_id(self, value)
    }

    fn try_get_token(
        &self,
        id: TokenId,
    ) -> Option<Token> {
        Vocabulary::try_get_token(self, id)
    }

    fn to_token_map(&self) -> TokenMap {
        Vocabulary::to_token_map(self)
    }

    fn save(
        &self,
        path: &Path,
    ) -> TokResult<()> {
        Vocabulary::save(self, path)
    }

    fn as_vocabulary(&self) -> Option<&Vocabulary> {
        Some(self)
    }
}
