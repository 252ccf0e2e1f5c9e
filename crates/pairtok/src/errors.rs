//! # Error Types

use std::path::PathBuf;

/// Errors from pairtok operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenizerError {
    /// Malformed argument to a pure operation; nothing was mutated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An argument was out of the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The encode request exceeded the configured maximum length.
    #[error("input length ({len}) exceeds maximum of {max} characters")]
    InputTooLarge {
        /// The length of the rejected input, in characters.
        len: usize,

        /// The configured maximum.
        max: usize,
    },

    /// The caller cancelled, or the operation deadline passed.
    #[error("operation cancelled")]
    Cancelled,

    /// A vocabulary file does not exist.
    #[error("vocabulary file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A vocabulary document could not be parsed.
    #[error("corrupt vocabulary: {0}")]
    Corrupt(String),

    /// The id counter would leave the [`TokenId`](crate::types::TokenId) range.
    #[error("vocab size ({size}) exceeds token id capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// An unexpected fault inside encode, decode, or stream processing.
    #[error("{context}")]
    Internal {
        /// What the tokenizer was doing.
        context: String,

        /// The underlying cause.
        #[source]
        source: Box<TokenizerError>,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TokenizerError {
    /// Is this the cancellation outcome?
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TokenizerError::Cancelled)
    }

    /// Is this a validation error which the caller should not retry?
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TokenizerError::InvalidInput(_)
                | TokenizerError::InvalidArgument(_)
                | TokenizerError::InputTooLarge { .. }
        )
    }

    /// Wrap an error as an [`TokenizerError::Internal`] failure.
    ///
    /// Cancellation and validation errors are recognized outcomes;
    /// they pass through unchanged. Everything else is logged and wrapped.
    ///
    /// ## Arguments
    /// * `context` - what the caller was doing.
    /// * `err` - the underlying error.
    pub fn wrap_internal(
        context: &str,
        err: TokenizerError,
    ) -> TokenizerError {
        if err.is_cancelled() || err.is_validation() {
            return err;
        }
        log::error!("{context}: {err}");
        TokenizerError::Internal {
            context: context.to_string(),
            source: Box::new(err),
        }
    }
}

/// Result type for pairtok operations.
pub type TokResult<T> = core::result::Result<T, TokenizerError>;
