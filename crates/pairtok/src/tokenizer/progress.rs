/// Cumulative progress of [`Tokenizer::encode_stream`](crate::Tokenizer::encode_stream).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizationProgress {
    /// Tokens produced so far.
    pub processed_tokens: usize,

    /// The high-water mark of known tokens.
    pub total_tokens: usize,

    /// Stream items encoded so far.
    pub items: usize,
}

impl TokenizationProgress {
    /// Account for one more encoded item.
    pub fn record_item(
        &mut self,
        token_count: usize,
    ) {
        self.items += 1;
        self.processed_tokens += token_count;
        self.total_tokens = self.total_tokens.max(self.processed_tokens);
    }

    /// Processed tokens as a percentage of the total; `0.0` when nothing is known.
    pub fn percentage_complete(&self) -> f64 {
        if self.total_tokens == 0 {
            0.0
        } else {
            self.processed_tokens as f64 * 100.0 / self.total_tokens as f64
        }
    }
}
