//! # Tokenizer
//!
//! [`Tokenizer`] orchestrates a request: length validation, timeout and
//! cancellation, the token cache, chunked parallel encoding, and metrics.
//!
//! ```rust
//! use pairtok::{Tokenizer, TokenizerOptions};
//!
//! let tokenizer = Tokenizer::new(TokenizerOptions::default()).unwrap();
//!
//! let tokens = tokenizer.encode("<|endoftext|>").unwrap();
//! assert_eq!(tokens.len(), 1);
//! assert!(tokens[0].is_special());
//!
//! let tokens = tokenizer.encode("hello, world").unwrap();
//! assert_eq!(tokenizer.decode(&tokens).unwrap(), "hello, world");
//! ```

mod progress;
mod tokenizer_impl;
mod tokenizer_options;

#[doc(inline)]
pub use progress::TokenizationProgress;
#[doc(inline)]
pub use tokenizer_impl::Tokenizer;
#[doc(inline)]
pub use tokenizer_options::TokenizerOptions;
