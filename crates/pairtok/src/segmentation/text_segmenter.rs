//! # Text Segmenter

use core::fmt::Debug;

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into contiguous, non-empty text elements.
///
/// Implementations must cover the input exactly: concatenating the
/// returned elements reproduces `text`.
pub trait TextSegmenter: Send + Sync + Debug {
    /// Split `text` into text elements.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    ///
    /// ## Returns
    /// The elements, in order, as sub-slices of `text`.
    fn split_elements<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str>;
}

/// Extended grapheme cluster segmentation.
///
/// Multi-code-point glyphs (emoji ZWJ sequences, flags, combining
/// marks) are kept whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphemeSegmenter;

impl TextSegmenter for GraphemeSegmenter {
    fn split_elements<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        text.graphemes(true).collect()
    }
}

/// One element per Unicode scalar value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharSegmenter;

impl TextSegmenter for CharSegmenter {
    fn split_elements<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        text.char_indices()
            .map(|(idx, c)| &text[idx..idx + c.len_utf8()])
            .collect()
    }
}

/// Adapts a plain function into a [`TextSegmenter`].
#[derive(Clone, Copy)]
pub struct FnSegmenter<F> {
    split: F,
}

impl<F> FnSegmenter<F>
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str> + Send + Sync,
{
    /// Wrap a splitting function.
    pub fn new(split: F) -> Self {
        Self { split }
    }
}

impl<F> Debug for FnSegmenter<F> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("FnSegmenter").finish_non_exhaustive()
    }
}

impl<F> TextSegmenter for FnSegmenter<F>
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str> + Send + Sync,
{
    fn split_elements<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        (self.split)(text)
    }
}
