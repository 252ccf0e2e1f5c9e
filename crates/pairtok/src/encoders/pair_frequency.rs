//! # Pair Frequency Analysis

use core::cmp::Ordering;

use crate::{
    types::{PTHashMap, hash_map_new},
    vocab::{Token, TokenPair},
};

/// Deterministic ranking of two counted pairs.
///
/// Frequency descending; then first value ascending; then second value
/// ascending. Values compare ordinally (byte-wise UTF-8).
pub fn pair_rank_order(
    a: &TokenPair,
    b: &TokenPair,
) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.first.value().cmp(b.first.value()))
        .then_with(|| a.second.value().cmp(b.second.value()))
}

/// Count every adjacent ``(value, value)`` pair in `tokens`.
///
/// Pairs are grouped by value equality, not token identity; each
/// returned pair carries the tokens of its first occurrence.
///
/// ## Returns
/// The counted pairs, ranked by [`pair_rank_order`].
pub fn rank_adjacent_pairs(tokens: &[Token]) -> Vec<TokenPair> {
    let mut counts: PTHashMap<(&str, &str), TokenPair> = hash_map_new();

    for window in tokens.windows(2) {
        let (left, right) = (&window[0], &window[1]);
        counts
            .entry((left.value(), right.value()))
            .or_insert_with(|| TokenPair::new(left.clone(), right.clone()))
            .frequency += 1;
    }

    let mut pairs: Vec<TokenPair> = counts.into_values().collect();
    pairs.sort_unstable_by(pair_rank_order);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<Token> {
        values
            .iter()
            .enumerate()
            .map(|(idx, v)| Token::new(*v, idx as u32, false))
            .collect()
    }

    fn summary(pairs: &[TokenPair]) -> Vec<(String, String, usize)> {
        pairs
            .iter()
            .map(|p| {
                (
                    p.first.value().to_string(),
                    p.second.value().to_string(),
                    p.frequency,
                )
            })
            .collect()
    }

    #[test]
    fn test_rank_adjacent_pairs() {
        assert!(rank_adjacent_pairs(&[]).is_empty());
        assert!(rank_adjacent_pairs(&tokens(&["a"])).is_empty());

        let ranked = rank_adjacent_pairs(&tokens(&["a", "b", "a", "b", "a", "c"]));
        assert_eq!(summary(&ranked), vec![
            ("a".to_string(), "b".to_string(), 2),
            ("b".to_string(), "a".to_string(), 2),
            ("a".to_string(), "c".to_string(), 1),
        ]);

        // Grouped by value: ids differ, values match.
        assert_eq!(ranked[0].first.id(), 0);
    }

    #[test]
    fn test_tie_breaks() {
        let ranked = rank_adjacent_pairs(&tokens(&["z", "y", "x", "b", "x", "a"]));
        assert!(ranked.iter().all(|p| p.frequency == 1));
        assert_eq!(
            summary(&ranked)
                .into_iter()
                .map(|(a, b, _)| format!("{a}{b}"))
                .collect::<Vec<_>>(),
            vec!["bx", "xa", "xb", "yx", "zy"]
        );
    }
}
