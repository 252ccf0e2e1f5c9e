//! # Chunked Encoding
//!
//! Large inputs are split into contiguous chunks which are encoded
//! independently and reassembled in input order.

use crate::{
    concurrency::CancelScope,
    encoders::PairEncoder,
    errors::TokResult,
    segmentation::TextSegmenter,
    vocab::Token,
};

/// Split `text` into contiguous chunks of whole text elements.
///
/// Each chunk closes as soon as it holds at least `chunk_chars`
/// characters; the last chunk may be shorter. A text element never
/// straddles two chunks.
///
/// Chunk boundaries are taken from each element's position in `text`,
/// so the chunks always cover `text` exactly, even when the segmenter
/// skips characters between elements.
///
/// ## Arguments
/// * `text` - the text to split.
/// * `chunk_chars` - the target chunk size, in characters; `0` yields one chunk.
/// * `segmenter` - the text element boundaries to respect.
pub fn split_into_chunks<'a>(
    text: &'a str,
    chunk_chars: usize,
    segmenter: &dyn TextSegmenter,
) -> Vec<&'a str> {
    if text.is_empty() {
        return Vec::new();
    }
    if chunk_chars == 0 {
        return vec![text];
    }

    let mut chunks = Vec::with_capacity(text.len() / chunk_chars + 1);
    let base = text.as_ptr() as usize;
    let mut start = 0;
    let mut counted = 0;
    let mut chars = 0;
    for element in segmenter.split_elements(text) {
        // Elements outside `text`, or ending off a char boundary, cannot close a chunk.
        let Some(end) = (element.as_ptr() as usize)
            .checked_sub(base)
            .map(|offset| offset + element.len())
            .filter(|&end| end > counted && end <= text.len() && text.is_char_boundary(end))
        else {
            continue;
        };

        chars += text[counted..end].chars().count();
        counted = end;
        if chars >= chunk_chars {
            chunks.push(&text[start..end]);
            start = end;
            chars = 0;
        }
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Encode chunks independently and concatenate the results in chunk order.
///
/// With the `rayon` feature the chunks are encoded on the rayon pool;
/// otherwise sequentially. Both paths produce the same sequence.
///
/// ## Arguments
/// * `encoder` - the encoder shared by all chunks.
/// * `chunks` - the chunks, in input order.
/// * `scope` - checked before each chunk starts and again after all join.
pub fn encode_chunks(
    encoder: &PairEncoder,
    chunks: &[&str],
    scope: &CancelScope<'_>,
) -> TokResult<Vec<Token>> {
    let encode_one = |chunk: &&str| -> TokResult<Vec<Token>> {
        scope.check()?;
        encoder.encode(chunk)
    };

    #[cfg(feature = "rayon")]
    let results: Vec<Vec<Token>> = {
        use rayon::prelude::*;
        chunks
            .par_iter()
            .map(encode_one)
            .collect::<TokResult<_>>()?
    };

    #[cfg(not(feature = "rayon"))]
    let results: Vec<Vec<Token>> = chunks
        .iter()
        .map(encode_one)
        .collect::<TokResult<_>>()?;

    scope.check()?;

    log::debug!("encoded {} chunks", results.len());
    Ok(results.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Instant};

    use super::*;
    use crate::{
        concurrency::CancellationToken,
        segmentation::{CharSegmenter, FnSegmenter, GraphemeSegmenter},
        vocab::Vocabulary,
    };

    #[test]
    fn test_split_into_chunks() {
        let seg = CharSegmenter;
        assert!(split_into_chunks("", 3, &seg).is_empty());
        assert_eq!(split_into_chunks("abcdefgh", 3, &seg), vec![
            "abc", "def", "gh"
        ]);
        assert_eq!(split_into_chunks("abcdef", 3, &seg), vec!["abc", "def"]);
        assert_eq!(split_into_chunks("abc", 0, &seg), vec!["abc"]);
        assert_eq!(split_into_chunks("ab", 10, &seg), vec!["ab"]);
    }

    #[test]
    fn test_split_respects_graphemes() {
        // "e" + combining accent is one element of 2 chars.
        let text = "ae\u{301}bc";
        assert_eq!(split_into_chunks(text, 2, &GraphemeSegmenter), vec![
            "ae\u{301}",
            "bc"
        ]);
        assert_eq!(split_into_chunks(text, 2, &CharSegmenter), vec![
            "ae", "\u{301}b", "c"
        ]);
    }

    #[test]
    fn test_split_with_gapped_segmenter() {
        // Elements skip the separators; chunks still cover the text exactly.
        let seg = FnSegmenter::new(|text: &str| text.split_whitespace().collect());
        assert_eq!(split_into_chunks("\u{e9} \u{e9}", 1, &seg), vec![
            "\u{e9}",
            " \u{e9}"
        ]);
        assert_eq!(split_into_chunks("ab  cd ", 2, &seg), vec!["ab", "  cd", " "]);

        // Elements which are not slices of the input are ignored.
        let foreign = FnSegmenter::new(|_: &str| vec!["zz", "zz"]);
        assert_eq!(split_into_chunks("abc", 1, &foreign), vec!["abc"]);
    }

    #[test]
    fn test_encode_chunks_in_order() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab);
        let token = CancellationToken::new();
        let scope = CancelScope::new(&token, Default::default());

        let text: String = (0..200).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = split_into_chunks(&text, 7, encoder.segmenter().as_ref());
        assert!(chunks.len() > 10);

        let tokens = encode_chunks(&encoder, &chunks, &scope).unwrap();
        let decoded: String = tokens.iter().map(|t| t.value()).collect();
        assert_eq!(decoded, text);
    }

    #[test]
    fn test_encode_chunks_cancelled() {
        let vocab = Arc::new(Vocabulary::new());
        let encoder = PairEncoder::new(vocab.clone());
        let token = CancellationToken::new();

        let expired = CancelScope::with_deadline(&token, Some(Instant::now()));
        let err = encode_chunks(&encoder, &["ab", "cd"], &expired).unwrap_err();
        assert!(err.is_cancelled());

        token.cancel();
        let scope = CancelScope::new(&token, Default::default());
        assert!(
            encode_chunks(&encoder, &["ab"], &scope)
                .unwrap_err()
                .is_cancelled()
        );
        assert!(vocab.is_empty());
    }
}
