//! # Frozen Vocabulary Snapshot

use compact_str::CompactString;

use crate::{
    types::{TokenId, PTHashMap},
    vocab::{Token, TokenMap, TokenVocab},
};

/// An immutable snapshot of a [`Vocabulary`](crate::vocab::Vocabulary).
///
/// Lookups need no locks; it cannot be extended.
#[derive(Debug, Clone, Default)]
pub struct FrozenVocab {
    token_to_id: PTHashMap<CompactString, TokenId>,
    id_to_token: PTHashMap<TokenId, Token>,
}

impl FrozenVocab {
    pub(crate) fn new(
        token_to_id: PTHashMap<CompactString, TokenId>,
        id_to_token: PTHashMap<TokenId, Token>,
    ) -> Self {
        Self {
            token_to_id,
            id_to_token,
        }
    }

    /// Look up the full token for a value.
    pub fn get_token(
        &self,
        value: &str,
    ) -> Option<&Token> {
        self.token_to_id
            .get(value)
            .and_then(|id| self.id_to_token.get(id))
    }
}

impl TokenVocab for FrozenVocab {
    fn len(&self) -> usize {
        self.token_to_id.len()
    }

    fn try_get_id(
        &self,
        value: &str,
    ) -> Option<TokenId> {
        self.token_to_id.get(value).copied()
    }

    fn try_get_token(
        &self,
        id: TokenId,
    ) -> Option<Token> {
        self.id_to_token.get(&id).cloned()
    }

    fn to_token_map(&self) -> TokenMap {
        self.token_to_id
            .iter()
            .map(|(value, &id)| (value.clone(), id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::vocab::{TokenVocab, Vocabulary};

    #[test]
    fn test_freeze() {
        let vocab = Vocabulary::new();
        vocab.add_token("a", false).unwrap();
        vocab.register_special("<|s|>").unwrap();

        let frozen = vocab.freeze();
        vocab.add_token("late", false).unwrap();

        assert_eq!(frozen.len(), 2);
        assert!(frozen.contains("a"));
        assert!(!frozen.contains("late"));
        assert!(frozen.get_token("<|s|>").unwrap().is_special());
        assert_eq!(frozen.try_get_token(0).unwrap().value(), "a");
        assert!(frozen.as_vocabulary().is_none());
    }
}
