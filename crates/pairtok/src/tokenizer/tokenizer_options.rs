use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options for configuring a [`Tokenizer`](crate::Tokenizer).
///
/// Missing fields deserialize to their defaults, so a partial
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// The largest vocabulary a builder may be asked for.
    pub max_vocab_size: usize,

    /// The longest text, in characters, a single encode accepts.
    pub max_token_length: usize,

    /// Consult and populate the token cache?
    pub enable_caching: bool,

    /// The token cache capacity, in entries.
    pub cache_capacity: usize,

    /// Texts at least this many characters long are chunked and
    /// encoded in parallel; `0` disables chunking.
    pub parallelization_threshold: usize,

    /// The per-operation timeout; [`Duration::ZERO`] disables it.
    #[serde(rename = "operation_timeout_ms", with = "duration_millis")]
    pub operation_timeout: Duration,

    /// Comma separated special tokens.
    pub special_tokens: String,

    /// Keep whitespace runs verbatim? Otherwise each run collapses to one space.
    pub preserve_whitespace: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            max_vocab_size: 100_000,
            max_token_length: 1024,
            enable_caching: true,
            cache_capacity: 10_000,
            parallelization_threshold: 1000,
            operation_timeout: Duration::from_secs(5 * 60),
            special_tokens: "<|endoftext|>".to_string(),
            preserve_whitespace: true,
        }
    }
}

impl TokenizerOptions {
    /// The configured special tokens.
    ///
    /// Splits on `,`, trims whitespace, and skips blank entries.
    pub fn special_token_list(&self) -> Vec<&str> {
        self.special_tokens
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Sets the maximum vocabulary size.
    pub fn with_max_vocab_size(
        self,
        max_vocab_size: usize,
    ) -> Self {
        Self {
            max_vocab_size,
            ..self
        }
    }

    /// Sets the maximum encode length, in characters.
    pub fn with_max_token_length(
        self,
        max_token_length: usize,
    ) -> Self {
        Self {
            max_token_length,
            ..self
        }
    }

    /// Enables or disables the token cache.
    pub fn with_caching(
        self,
        enable_caching: bool,
    ) -> Self {
        Self {
            enable_caching,
            ..self
        }
    }

    /// Sets the token cache capacity.
    pub fn with_cache_capacity(
        self,
        cache_capacity: usize,
    ) -> Self {
        Self {
            cache_capacity,
            ..self
        }
    }

    /// Sets the chunking threshold, in characters; `0` disables chunking.
    pub fn with_parallelization_threshold(
        self,
        parallelization_threshold: usize,
    ) -> Self {
        Self {
            parallelization_threshold,
            ..self
        }
    }

    /// Sets the per-operation timeout; [`Duration::ZERO`] disables it.
    pub fn with_operation_timeout(
        self,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            operation_timeout,
            ..self
        }
    }

    /// Sets the comma separated special tokens.
    pub fn with_special_tokens<S: Into<String>>(
        self,
        special_tokens: S,
    ) -> Self {
        Self {
            special_tokens: special_tokens.into(),
            ..self
        }
    }

    /// Sets whitespace preservation.
    pub fn with_preserve_whitespace(
        self,
        preserve_whitespace: bool,
    ) -> Self {
        Self {
            preserve_whitespace,
            ..self
        }
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        duration: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
