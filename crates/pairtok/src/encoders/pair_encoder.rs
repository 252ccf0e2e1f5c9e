//! # Pair Encoder

use std::sync::Arc;

use crate::{
    encoders::pair_frequency::rank_adjacent_pairs,
    errors::TokResult,
    segmentation::{GraphemeSegmenter, TextSegmenter},
    vocab::{MergeRule, Token, TokenPair, Vocabulary},
};

/// Byte-Pair encoder over a shared [`Vocabulary`].
///
/// Encoding registers previously unseen text elements in the
/// vocabulary as a side effect.
#[derive(Debug, Clone)]
pub struct PairEncoder {
    vocab: Arc<Vocabulary>,
    segmenter: Arc<dyn TextSegmenter>,
}

impl PairEncoder {
    /// Create an encoder with the default [`GraphemeSegmenter`].
    ///
    /// ## Arguments
    /// * `vocab` - the vocabulary to read and extend.
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self {
            vocab,
            segmenter: Arc::new(GraphemeSegmenter),
        }
    }

    /// Replace the initial segmentation function.
    pub fn with_segmenter(
        self,
        segmenter: Arc<dyn TextSegmenter>,
    ) -> Self {
        Self { segmenter, ..self }
    }

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// The initial segmentation function.
    pub fn segmenter(&self) -> &Arc<dyn TextSegmenter> {
        &self.segmenter
    }

    /// Encode text into tokens.
    ///
    /// * Empty text encodes to no tokens.
    /// * Text which is exactly a registered special token encodes to that
    ///   single token, bypassing segmentation and merging.
    /// * Otherwise: initial segmentation, then the vocabulary's merge rules.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    ///
    /// ## Returns
    /// A `Result` containing the tokens; errors only if the vocabulary
    /// cannot register a new element.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn encode(
        &self,
        text: &str,
    ) -> TokResult<Vec<Token>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(token) = self.vocab.get_token(text)
            && token.is_special()
        {
            return Ok(vec![token]);
        }

        let mut tokens = self.initial_tokens(text)?;
        let rules = self.vocab.merge_rules();
        self.apply_merges(&mut tokens, &rules);
        Ok(tokens)
    }

    /// Split text into text elements and map each to its token.
    ///
    /// Unseen elements are registered as new, non-special tokens.
    pub fn initial_tokens(
        &self,
        text: &str,
    ) -> TokResult<Vec<Token>> {
        self.segmenter
            .split_elements(text)
            .into_iter()
            .map(|element| self.vocab.get_or_add_token(element, false))
            .collect()
    }

    /// Apply merge rules to `tokens` until nothing changes.
    ///
    /// Each pass walks the rules in registration order; for each rule it
    /// scans left to right, replacing every adjacent match with the token
    /// for the concatenated value. After a merge the scan stays at the
    /// same position, so the merged token is immediately re-checked against
    /// its new right neighbour. Passes repeat until one merges nothing.
    ///
    /// A concatenated value missing from the vocabulary leaves the pair
    /// unmerged.
    ///
    /// ## Arguments
    /// * `tokens` - The token sequence, rewritten in place.
    /// * `rules` - The merge rules, in application order.
    pub fn apply_merges(
        &self,
        tokens: &mut Vec<Token>,
        rules: &[MergeRule],
    ) {
        let mut changed = true;
        while changed && tokens.len() > 1 {
            changed = false;
            for rule in rules {
                let mut idx = 0;
                while idx + 1 < tokens.len() {
                    if !rule.pair.matches(&tokens[idx], &tokens[idx + 1]) {
                        idx += 1;
                        continue;
                    }

                    let merged_value = rule.merged_value();
                    match self.vocab.get_token(&merged_value) {
                        Some(merged) => {
                            tokens[idx] = merged;
                            tokens.remove(idx + 1);
                            changed = true;
                        }
                        None => {
                            log::warn!("merge result {merged_value:?} is not in the vocabulary");
                            idx += 1;
                        }
                    }
                }
            }
        }
    }

    /// Count adjacent pairs and rank them.
    ///
    /// Frequency descending; then first value ascending; then
    /// second value ascending.
    pub fn find_most_frequent_pairs(
        &self,
        tokens: &[Token],
    ) -> Vec<TokenPair> {
        rank_adjacent_pairs(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        segmentation::CharSegmenter,
        types::{check_is_send, check_is_sync},
    };

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value()).collect()
    }

    fn rule(
        vocab: &Vocabulary,
        first: &str,
        second: &str,
        priority: usize,
    ) -> MergeRule {
        let pair = TokenPair::new(
            vocab.get_or_add_token(first, false).unwrap(),
            vocab.get_or_add_token(second, false).unwrap(),
        );
        vocab.add_token(&pair.merged_value(), false).unwrap();
        MergeRule::new(pair, priority)
    }

    #[test]
    fn test_encode_basics() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());
        check_is_send(&encoder);
        check_is_sync(&encoder);

        assert!(encoder.encode("").unwrap().is_empty());
        assert!(vocab.is_empty());

        let tokens = encoder.encode("abca").unwrap();
        assert_eq!(values(&tokens), vec!["a", "b", "c", "a"]);
        assert_eq!(tokens[0], tokens[3]);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn test_special_bypass() {
        let vocab = Arc::new(Vocabulary::new());
        let id = vocab.register_special("<|endoftext|>").unwrap();
        let encoder = PairEncoder::new(vocab.clone());

        let tokens = encoder.encode("<|endoftext|>").unwrap();
        assert_eq!(tokens, vec![Token::new("<|endoftext|>", id, true)]);

        // Only exact, whole-input matches bypass segmentation.
        let tokens = encoder.encode("<|endoftext|>!").unwrap();
        assert_eq!(tokens.len(), 14);

        // A normal token matching the whole input is still segmented.
        vocab.add_token("ab", false).unwrap();
        assert_eq!(values(&encoder.encode("ab").unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_apply_merges_fixed_point() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());

        let rules = vec![
            rule(&vocab, "a", "b", 0),
            rule(&vocab, "ab", "c", 1),
            rule(&vocab, "c", "c", 2),
        ];
        for r in &rules {
            vocab.add_merge_rule(r.clone());
        }

        let tokens = encoder.encode("abcabcc").unwrap();
        assert_eq!(values(&tokens), vec!["abc", "abc", "c"]);
        assert_eq!(tokens[0].id(), vocab.try_get_id("abc").unwrap());
    }

    #[test]
    fn test_merge_rescans_in_place() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());

        // "a" + "a" -> "aa"; the merged token is re-checked at the same index.
        let rules = vec![rule(&vocab, "a", "a", 0), rule(&vocab, "aa", "a", 1)];

        let mut tokens = encoder.initial_tokens("aaaa").unwrap();
        encoder.apply_merges(&mut tokens, &rules[..1]);
        assert_eq!(values(&tokens), vec!["aa", "aa"]);

        let mut tokens = encoder.initial_tokens("aaa").unwrap();
        encoder.apply_merges(&mut tokens, &rules);
        assert_eq!(values(&tokens), vec!["aaa"]);
    }

    #[test]
    fn test_rule_order_is_significant() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());

        let ab = rule(&vocab, "a", "b", 0);
        let bc = rule(&vocab, "b", "c", 1);

        let mut tokens = encoder.initial_tokens("abc").unwrap();
        encoder.apply_merges(&mut tokens, &[ab.clone(), bc.clone()]);
        assert_eq!(values(&tokens), vec!["ab", "c"]);

        let mut tokens = encoder.initial_tokens("abc").unwrap();
        encoder.apply_merges(&mut tokens, &[bc, ab]);
        assert_eq!(values(&tokens), vec!["a", "bc"]);
    }

    #[test]
    fn test_missing_merge_value_is_skipped() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());

        let pair = TokenPair::new(
            vocab.get_or_add_token("x", false).unwrap(),
            vocab.get_or_add_token("y", false).unwrap(),
        );
        let mut tokens = encoder.initial_tokens("xyxy").unwrap();
        encoder.apply_merges(&mut tokens, &[MergeRule::new(pair, 0)]);
        assert_eq!(values(&tokens), vec!["x", "y", "x", "y"]);
    }

    #[test]
    fn test_custom_segmenter() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone()).with_segmenter(Arc::new(CharSegmenter));

        let tokens = encoder.encode("e\u{301}").unwrap();
        assert_eq!(values(&tokens), vec!["e", "\u{301}"]);
    }

    #[test]
    fn test_find_most_frequent_pairs() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab);

        let tokens = encoder.initial_tokens("abab").unwrap();
        let pairs = encoder.find_most_frequent_pairs(&tokens);
        assert_eq!(pairs[0].merged_value(), "ab");
        assert_eq!(pairs[0].frequency, 2);
        assert_eq!(pairs[1].merged_value(), "ba");
        assert_eq!(pairs[1].frequency, 1);
    }
}
