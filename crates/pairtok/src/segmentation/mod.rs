//! # Text Segmentation
//!
//! Initial segmentation splits text into "text elements", the smallest
//! units the encoder starts merging from.
//!
//! [`TextSegmenter`] is the pluggable seam:
//! * [`GraphemeSegmenter`] - extended grapheme clusters (the default),
//! * [`CharSegmenter`] - one element per Unicode scalar value,
//! * [`FnSegmenter`] - any caller-provided splitting function.

pub mod text_segmenter;

#[doc(inline)]
pub use text_segmenter::{CharSegmenter, FnSegmenter, GraphemeSegmenter, TextSegmenter};
