//! # Merge Rule Learning

use core::slice;

use crate::{
    concurrency::CancellationToken,
    encoders::PairEncoder,
    errors::TokResult,
    vocab::MergeRule,
};

impl PairEncoder {
    /// Learn merge rules from a corpus.
    ///
    /// See [`PairEncoder::learn_merge_rules_cancellable`].
    pub fn learn_merge_rules<I>(
        &self,
        corpus: I,
        num_merges: usize,
    ) -> TokResult<Vec<MergeRule>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.learn_merge_rules_cancellable(corpus, num_merges, &CancellationToken::new())
    }

    /// Learn merge rules from a corpus, replacing the vocabulary's rules.
    ///
    /// Every corpus item is segmented (no merges) into one combined
    /// working sequence. Each iteration takes the top-ranked adjacent pair;
    /// learning stops early once the best frequency is below 2. Each
    /// accepted pair is registered as a token, appended as a rule with
    /// `priority` equal to the number of rules learned before it, and
    /// immediately applied to the working sequence.
    ///
    /// ## Arguments
    /// * `corpus` - the training texts, in order.
    /// * `num_merges` - the maximum number of rules to learn.
    /// * `cancel` - checked between corpus items and between merges.
    ///
    /// ## Returns
    /// The learned rules, in learning order.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, corpus, cancel)))]
    pub fn learn_merge_rules_cancellable<I>(
        &self,
        corpus: I,
        num_merges: usize,
        cancel: &CancellationToken,
    ) -> TokResult<Vec<MergeRule>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.vocab().clear_merge_rules();

        let mut working = Vec::new();
        for item in corpus {
            cancel.check()?;
            working.extend(self.initial_tokens(item.as_ref())?);
        }

        log::info!(
            "Starting merge learning: up to {} merges over {} tokens",
            num_merges,
            working.len()
        );

        let mut rules: Vec<MergeRule> = Vec::new();
        while rules.len() < num_merges && working.len() > 1 {
            cancel.check()?;

            let Some(best) = self.find_most_frequent_pairs(&working).into_iter().next() else {
                break;
            };
            if best.frequency < 2 {
                break;
            }

            self.vocab().add_token(&best.merged_value(), false)?;

            let rule = MergeRule::new(best, rules.len());
            self.vocab().add_merge_rule(rule.clone());
            self.apply_merges(&mut working, slice::from_ref(&rule));

            log::debug!(
                "merge {}: {:?} + {:?} (frequency: {})",
                rule.priority,
                rule.pair.first.value(),
                rule.pair.second.value(),
                rule.pair.frequency
            );
            rules.push(rule);
        }

        log::info!("Finished merge learning: {} rules learned", rules.len());
        Ok(rules)
    }
}
