use std::{borrow::Cow, path::Path, sync::Arc};

use crate::{
    cache::TokenCache,
    concurrency::{CancelScope, CancellationToken, encode_chunks, split_into_chunks},
    encoders::PairEncoder,
    errors::{TokResult, TokenizerError},
    metrics::{MetricsSink, TokenizerMetrics, measure_operation},
    segmentation::TextSegmenter,
    tokenizer::{TokenizationProgress, TokenizerOptions},
    types::TokenId,
    vocab::{MergeRule, Token, Vocabulary},
};

/// The tokenizer orchestrator.
///
/// Combines:
///  * a shared [`Vocabulary`],
///  * a [`PairEncoder`] over it,
///  * a [`TokenCache`] of whole-input encodings, and
///  * a [`MetricsSink`].
///
/// Every operation takes `&self`; a `Tokenizer` may be shared across threads.
pub struct Tokenizer {
    options: TokenizerOptions,
    vocab: Arc<Vocabulary>,
    encoder: PairEncoder,
    cache: TokenCache,
    metrics: Arc<dyn MetricsSink>,
}

impl core::fmt::Debug for Tokenizer {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("options", &self.options)
            .field("vocab_len", &self.vocab.len())
            .field("encoder", &self.encoder)
            .field("cache", &self.cache)
            .finish()
    }
}

impl Tokenizer {
    /// Create a tokenizer over an empty vocabulary.
    ///
    /// The configured special tokens are registered before anything else,
    /// so they receive the lowest ids.
    pub fn new(options: TokenizerOptions) -> TokResult<Self> {
        Self::from_parts(
            options,
            Arc::new(Vocabulary::new()),
            Arc::new(TokenizerMetrics::new()),
        )
    }

    /// Create a tokenizer over an existing vocabulary.
    pub fn with_vocabulary(
        options: TokenizerOptions,
        vocab: Arc<Vocabulary>,
    ) -> TokResult<Self> {
        Self::from_parts(options, vocab, Arc::new(TokenizerMetrics::new()))
    }

    /// Create a tokenizer from its parts.
    ///
    /// ## Arguments
    /// * `options` - the tokenizer configuration.
    /// * `vocab` - the vocabulary to read and extend.
    /// * `metrics` - the sink receiving token, cache, and timing events.
    ///
    /// ## Returns
    /// The tokenizer, with the configured special tokens registered in `vocab`.
    pub fn from_parts(
        options: TokenizerOptions,
        vocab: Arc<Vocabulary>,
        metrics: Arc<dyn MetricsSink>,
    ) -> TokResult<Self> {
        let tokenizer = Self {
            encoder: PairEncoder::new(vocab.clone()),
            cache: TokenCache::new(options.cache_capacity, metrics.clone()),
            options,
            vocab,
            metrics,
        };
        tokenizer.register_special_tokens()?;
        Ok(tokenizer)
    }

    /// Replace the encoder's initial segmentation function.
    pub fn with_segmenter(
        self,
        segmenter: Arc<dyn TextSegmenter>,
    ) -> Self {
        self.cache.clear();
        let encoder = self.encoder.clone().with_segmenter(segmenter);
        Self { encoder, ..self }
    }

    fn register_special_tokens(&self) -> TokResult<()> {
        for special in self.options.special_token_list() {
            self.vocab.register_special(special)?;
        }
        Ok(())
    }

    /// The tokenizer configuration.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// The shared vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// The underlying encoder.
    pub fn encoder(&self) -> &PairEncoder {
        &self.encoder
    }

    /// The token cache.
    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    /// The metrics sink.
    pub fn metrics(&self) -> &Arc<dyn MetricsSink> {
        &self.metrics
    }

    /// Encode text into tokens.
    ///
    /// See [`Tokenizer::encode_cancellable`].
    pub fn encode(
        &self,
        text: &str,
    ) -> TokResult<Vec<Token>> {
        self.encode_cancellable(text, &CancellationToken::new())
    }

    /// Encode text into tokens.
    ///
    /// * Empty text encodes to no tokens, without side effects.
    /// * Text longer than `max_token_length` characters is rejected
    ///   before any work begins.
    /// * Text at least `parallelization_threshold` characters long is
    ///   split into chunks which are encoded in parallel and reassembled
    ///   in input order.
    ///
    /// The operation runs under the configured timeout, linked with `cancel`.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    /// * `cancel` - the caller's cancellation token.
    ///
    /// ## Returns
    /// The tokens; or [`TokenizerError::InputTooLarge`],
    /// [`TokenizerError::Cancelled`], or [`TokenizerError::Internal`]
    /// wrapping any other failure.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, cancel)))]
    pub fn encode_cancellable(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> TokResult<Vec<Token>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let _timer = measure_operation(self.metrics.as_ref(), "encode");

        let len = text.chars().count();
        if len > self.options.max_token_length {
            return Err(TokenizerError::InputTooLarge {
                len,
                max: self.options.max_token_length,
            });
        }

        let scope = CancelScope::new(cancel, self.options.operation_timeout);
        self.encode_scoped(text, &scope)
            .map_err(|err| TokenizerError::wrap_internal("failed to encode text", err))
    }

    fn encode_scoped(
        &self,
        text: &str,
        scope: &CancelScope<'_>,
    ) -> TokResult<Vec<Token>> {
        let text = if self.options.preserve_whitespace {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(collapse_whitespace(text))
        };

        if self.options.enable_caching
            && let Some(tokens) = self.cache.try_get(&text)
        {
            self.record_tokens(&tokens);
            return Ok(tokens.to_vec());
        }

        scope.check()?;

        let threshold = self.options.parallelization_threshold;
        let tokens = if let Some(special) = self.vocab.get_token(&text)
            && special.is_special()
        {
            // Whole-input special tokens are never chunked.
            vec![special]
        } else if threshold > 0 && text.chars().count() >= threshold {
            let _timer = measure_operation(self.metrics.as_ref(), "parallel_encode");
            let chunks = split_into_chunks(&text, threshold, self.encoder.segmenter().as_ref());
            encode_chunks(&self.encoder, &chunks, scope)?
        } else {
            let tokens = self.encoder.encode(&text)?;
            scope.check()?;
            tokens
        };

        self.record_tokens(&tokens);
        if self.options.enable_caching {
            self.cache.put(&text, tokens.as_slice());
        }
        Ok(tokens)
    }

    fn record_tokens(
        &self,
        tokens: &[Token],
    ) {
        for token in tokens {
            self.metrics.record_token(token.value());
        }
    }

    /// Decode tokens into text.
    ///
    /// See [`Tokenizer::decode_cancellable`].
    pub fn decode(
        &self,
        tokens: &[Token],
    ) -> TokResult<String> {
        self.decode_cancellable(tokens, &CancellationToken::new())
    }

    /// Decode tokens into text by concatenating their values in order.
    ///
    /// Cancellation and the configured timeout are checked between tokens.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, cancel)))]
    pub fn decode_cancellable(
        &self,
        tokens: &[Token],
        cancel: &CancellationToken,
    ) -> TokResult<String> {
        if tokens.is_empty() {
            return Ok(String::new());
        }

        let _timer = measure_operation(self.metrics.as_ref(), "decode");
        let scope = CancelScope::new(cancel, self.options.operation_timeout);

        let mut text = String::with_capacity(tokens.iter().map(|t| t.value().len()).sum());
        for token in tokens {
            scope.check()?;
            text.push_str(token.value());
        }
        Ok(text)
    }

    /// Decode token ids into text.
    ///
    /// ## Returns
    /// The text, or [`TokenizerError::InvalidInput`] naming the first
    /// id missing from the vocabulary.
    pub fn decode_ids(
        &self,
        ids: &[TokenId],
    ) -> TokResult<String> {
        let tokens = ids
            .iter()
            .map(|&id| {
                self.vocab
                    .try_get_token(id)
                    .ok_or_else(|| TokenizerError::InvalidInput(format!("unknown token id {id}")))
            })
            .collect::<TokResult<Vec<_>>>()?;
        self.decode(&tokens)
    }

    /// Encode a stream of texts, one item at a time.
    ///
    /// Items are pulled lazily; cancellation is checked before each pull.
    /// After each item, `on_item` receives its tokens and the cumulative
    /// progress, in stream order.
    ///
    /// ## Arguments
    /// * `stream` - the texts to encode.
    /// * `cancel` - the caller's cancellation token.
    /// * `on_item` - the progress observer.
    ///
    /// ## Returns
    /// The final progress, or the first error from [`Tokenizer::encode_cancellable`].
    pub fn encode_stream<I, F>(
        &self,
        stream: I,
        cancel: &CancellationToken,
        mut on_item: F,
    ) -> TokResult<TokenizationProgress>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: FnMut(&[Token], &TokenizationProgress),
    {
        let _timer = measure_operation(self.metrics.as_ref(), "encode_stream");

        let mut progress = TokenizationProgress::default();
        let mut stream = stream.into_iter();
        loop {
            cancel.check()?;
            let Some(item) = stream.next() else {
                break;
            };

            let tokens = self.encode_cancellable(item.as_ref(), cancel)?;
            progress.record_item(tokens.len());
            on_item(&tokens, &progress);
        }
        Ok(progress)
    }

    /// Learn merge rules into this tokenizer's vocabulary.
    ///
    /// See [`Tokenizer::train_cancellable`].
    pub fn train<I>(
        &self,
        corpus: I,
        num_merges: usize,
    ) -> TokResult<Vec<MergeRule>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.train_cancellable(corpus, num_merges, &CancellationToken::new())
    }

    /// Learn merge rules into this tokenizer's vocabulary.
    ///
    /// Replaces the existing rules, and clears the cache.
    pub fn train_cancellable<I>(
        &self,
        corpus: I,
        num_merges: usize,
        cancel: &CancellationToken,
    ) -> TokResult<Vec<MergeRule>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let _timer = measure_operation(self.metrics.as_ref(), "train");
        let result = self
            .encoder
            .learn_merge_rules_cancellable(corpus, num_merges, cancel);
        self.cache.clear();
        result
    }

    /// Save the vocabulary as a JSON document.
    pub fn save_vocabulary<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TokResult<()> {
        self.vocab.save(path)
    }

    /// Replace the vocabulary with a saved JSON document.
    ///
    /// The configured special tokens are registered again, since the
    /// document does not carry special flags; the cache is cleared.
    pub fn load_vocabulary<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> TokResult<()> {
        self.vocab.load(path)?;
        self.register_special_tokens()?;
        self.cache.clear();
        Ok(())
    }

    /// Log a summary of the collected metrics.
    pub fn log_metrics(&self) {
        self.metrics.log_summary();
    }
}

/// Collapse each run of whitespace to one ASCII space.
fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push(' ');
            }
            in_whitespace = true;
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }
    collapsed
}
