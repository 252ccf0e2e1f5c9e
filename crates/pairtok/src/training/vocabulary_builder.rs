//! # Vocabulary Builder

use std::sync::Arc;

use crate::{
    concurrency::CancellationToken,
    encoders::PairEncoder,
    errors::{TokResult, TokenizerError},
    segmentation::{GraphemeSegmenter, TextSegmenter},
    tokenizer::TokenizerOptions,
    vocab::{TokenVocab, Vocabulary},
};

/// Builds and extends [`Vocabulary`] instances.
#[derive(Debug, Clone)]
pub struct VocabularyBuilder {
    options: TokenizerOptions,
    segmenter: Arc<dyn TextSegmenter>,
}

impl VocabularyBuilder {
    /// Create a builder.
    ///
    /// ## Arguments
    /// * `options` - supplies the size limit and the special tokens.
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            options,
            segmenter: Arc::new(GraphemeSegmenter),
        }
    }

    /// Replace the initial segmentation function used while learning.
    pub fn with_segmenter(
        self,
        segmenter: Arc<dyn TextSegmenter>,
    ) -> Self {
        Self { segmenter, ..self }
    }

    /// The builder options.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Build a vocabulary from a corpus.
    ///
    /// See [`VocabularyBuilder::build_from_corpus_cancellable`].
    pub fn build_from_corpus<I>(
        &self,
        corpus: I,
        target_size: usize,
    ) -> TokResult<Arc<Vocabulary>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.build_from_corpus_cancellable(corpus, target_size, &CancellationToken::new())
    }

    /// Build a fresh vocabulary from a corpus.
    ///
    /// Learns up to `target_size` merge rules into a fresh vocabulary,
    /// registers the configured special tokens, then registers every
    /// learned merge value in rule order. The returned vocabulary
    /// carries the learned rules.
    ///
    /// ## Arguments
    /// * `corpus` - the training texts.
    /// * `target_size` - the number of merges to learn; in `1..=max_vocab_size`.
    /// * `cancel` - checked throughout learning.
    ///
    /// ## Returns
    /// The new vocabulary, or [`TokenizerError::InvalidArgument`] for an
    /// out-of-range `target_size`.
    pub fn build_from_corpus_cancellable<I>(
        &self,
        corpus: I,
        target_size: usize,
        cancel: &CancellationToken,
    ) -> TokResult<Arc<Vocabulary>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        if target_size == 0 {
            return Err(TokenizerError::InvalidArgument(
                "target size must be positive".to_string(),
            ));
        }
        if target_size > self.options.max_vocab_size {
            return Err(TokenizerError::InvalidArgument(format!(
                "target size ({target_size}) exceeds maximum vocabulary size of {}",
                self.options.max_vocab_size
            )));
        }

        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone()).with_segmenter(self.segmenter.clone());

        let rules = encoder.learn_merge_rules_cancellable(corpus, target_size, cancel)?;

        for special in self.options.special_token_list() {
            vocab.register_special(special)?;
        }
        for rule in &rules {
            vocab.add_token(&rule.merged_value(), false)?;
        }

        log::info!(
            "Built vocabulary: {} tokens, {} merge rules",
            vocab.len(),
            rules.len()
        );
        Ok(vocab)
    }

    /// Register new non-special tokens in an existing vocabulary.
    ///
    /// Existing values are left untouched.
    ///
    /// ## Arguments
    /// * `vocab` - must be a mutable [`Vocabulary`].
    /// * `new_tokens` - the values to register.
    ///
    /// ## Returns
    /// * [`TokenizerError::InvalidArgument`] if `vocab` is not a [`Vocabulary`].
    /// * [`TokenizerError::InvalidInput`] if any value is empty; nothing is registered.
    pub fn update_vocabulary<I>(
        &self,
        vocab: &dyn TokenVocab,
        new_tokens: I,
    ) -> TokResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let Some(vocab) = vocab.as_vocabulary() else {
            return Err(TokenizerError::InvalidArgument(
                "vocabulary must be a mutable Vocabulary".to_string(),
            ));
        };

        let values: Vec<I::Item> = new_tokens.into_iter().collect();
        if values.iter().any(|v| v.as_ref().is_empty()) {
            return Err(TokenizerError::InvalidInput(
                "token value must be non-empty".to_string(),
            ));
        }

        let before = vocab.len();
        for value in &values {
            vocab.add_token(value.as_ref(), false)?;
        }
        log::debug!("update_vocabulary: {} new tokens", vocab.len() - before);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmentation::CharSegmenter;

    fn builder() -> VocabularyBuilder {
        VocabularyBuilder::new(
            TokenizerOptions::default()
                .with_max_vocab_size(50)
                .with_special_tokens("<|endoftext|>, <pad>"),
        )
    }

    #[test]
    fn test_rejects_invalid_target_size() {
        let builder = builder();

        let err = builder.build_from_corpus(["abab"], 0).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidArgument(_)));

        let err = builder.build_from_corpus(["abab"], 51).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidArgument(_)));

        assert!(builder.build_from_corpus(["abab"], 50).is_ok());
    }

    #[test]
    fn test_build_from_corpus() {
        let vocab = builder()
            .build_from_corpus(["ab", "ab", "ac"], 1)
            .unwrap();

        assert!(vocab.contains("ab"));
        assert_eq!(vocab.merge_rule_count(), 1);

        for special in ["<|endoftext|>", "<pad>"] {
            let token = vocab.get_token(special).unwrap();
            assert!(token.is_special());
        }
        assert!(!vocab.get_token("ab").unwrap().is_special());
    }

    #[test]
    fn test_learned_rules_are_bounded() {
        let corpus = ["low lower lowest", "new newer newest", "wide wider widest"];
        let vocab = builder().build_from_corpus(corpus, 5).unwrap();
        assert!(vocab.merge_rule_count() <= 5);
        for rule in vocab.merge_rules() {
            assert!(vocab.contains(&rule.merged_value()));
        }
    }

    #[test]
    fn test_empty_corpus() {
        let vocab = builder()
            .build_from_corpus(Vec::<String>::new(), 10)
            .unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.merge_rule_count(), 0);
    }

    #[test]
    fn test_custom_segmenter() {
        let vocab = builder()
            .with_segmenter(Arc::new(CharSegmenter))
            .build_from_corpus(["e\u{301}e\u{301}"], 1)
            .unwrap();
        assert!(vocab.contains("\u{301}"));
        assert!(vocab.contains("e\u{301}"));
    }

    #[test]
    fn test_cancelled_build() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = builder()
            .build_from_corpus_cancellable(["abab"], 2, &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_update_vocabulary() {
        let builder = builder();
        let vocab = Vocabulary::new();
        let a = vocab.add_token("a", false).unwrap();

        builder.update_vocabulary(&vocab, ["a", "b", "b"]).unwrap();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.try_get_id("a"), Some(a));
        assert!(!vocab.get_token("b").unwrap().is_special());

        let err = builder.update_vocabulary(&vocab, ["c", ""]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidInput(_)));
        assert!(!vocab.contains("c"));
    }

    #[test]
    fn test_update_rejects_frozen() {
        let vocab = Vocabulary::new();
        vocab.add_token("a", false).unwrap();
        let frozen = vocab.freeze();

        let err = builder().update_vocabulary(&frozen, ["b"]).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidArgument(_)));
        assert_eq!(frozen.len(), 1);
    }
}
