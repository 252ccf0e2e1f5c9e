//! # Token Value Types

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::types::TokenId;

/// A registered vocabulary token.
///
/// Tokens are immutable values; two tokens with the same `value`
/// always carry the same `id` within one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    value: CompactString,
    id: TokenId,
    is_special: bool,
}

impl Token {
    /// Create a new token.
    ///
    /// ## Arguments
    /// * `value` - the token text.
    /// * `id` - the vocabulary id.
    /// * `is_special` - does this token bypass segmentation?
    pub fn new<S: Into<CompactString>>(
        value: S,
        id: TokenId,
        is_special: bool,
    ) -> Self {
        Self {
            value: value.into(),
            id,
            is_special,
        }
    }

    /// The token text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The vocabulary id.
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// Is this a special token?
    pub fn is_special(&self) -> bool {
        self.is_special
    }

    /// A copy of this token with the special flag set.
    pub(crate) fn to_special(&self) -> Self {
        Self {
            is_special: true,
            ..self.clone()
        }
    }
}

/// Two adjacent tokens, and how often they occur together.
///
/// Only used during frequency analysis; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// The left token.
    pub first: Token,

    /// The right token.
    pub second: Token,

    /// The number of adjacent occurrences counted.
    pub frequency: usize,
}

impl TokenPair {
    /// Create a new pair with zero frequency.
    pub fn new(
        first: Token,
        second: Token,
    ) -> Self {
        Self {
            first,
            second,
            frequency: 0,
        }
    }

    /// Does this pair match the values of the two given tokens?
    pub fn matches(
        &self,
        left: &Token,
        right: &Token,
    ) -> bool {
        self.first.value == left.value && self.second.value == right.value
    }

    /// The concatenated value a merge of this pair produces.
    pub fn merged_value(&self) -> CompactString {
        let mut merged = self.first.value.clone();
        merged.push_str(&self.second.value);
        merged
    }
}

/// A learned merge of one [`TokenPair`].
///
/// `priority` is the rule's insertion order; lower is learned earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    /// The pair this rule merges.
    pub pair: TokenPair,

    /// The insertion order of the rule.
    pub priority: usize,
}

impl MergeRule {
    /// Create a new merge rule.
    pub fn new(
        pair: TokenPair,
        priority: usize,
    ) -> Self {
        Self { pair, priority }
    }

    /// The concatenated value this rule produces.
    pub fn merged_value(&self) -> CompactString {
        self.pair.merged_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_matching() {
        let a = Token::new("a", 0, false);
        let b = Token::new("b", 1, false);

        let pair = TokenPair::new(a.clone(), b.clone());
        assert_eq!(pair.frequency, 0);
        assert!(pair.matches(&a, &b));
        assert!(!pair.matches(&b, &a));

        // Matching is by value, not id.
        assert!(pair.matches(&Token::new("a", 9, false), &b));

        let rule = MergeRule::new(pair, 0);
        assert_eq!(rule.merged_value(), "ab");
    }

    #[test]
    fn test_to_special() {
        let token = Token::new("<|x|>", 4, false);
        let special = token.to_special();
        assert!(special.is_special());
        assert_eq!(special.id(), 4);
        assert_eq!(special.value(), "<|x|>");
    }
}
