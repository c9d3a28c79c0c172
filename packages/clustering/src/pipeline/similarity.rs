//! Token-set similarity between free-text product names.

use std::collections::HashSet;

/// Informative tokens of a name: lowercased, hyphens/underscores split,
/// other punctuation stripped, tokens of length <= 2 discarded.
fn token_set(name: &str) -> HashSet<String> {
    let normalized: String = name
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            '-' | '_' => Some(' '),
            c if c.is_ascii_alphanumeric() || c.is_whitespace() => Some(c),
            _ => None,
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}

/// Jaccard index over the informative-token sets of two names.
///
/// Symmetric, order-independent, and case/punctuation-insensitive.
/// Returns 0.0 when neither name has an informative token, so the
/// measure is total on any input.
pub fn similarity(a: &str, b: &str) -> f64 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_names_score_one() {
        assert_eq!(similarity("Sony WH-1000XM5", "Sony WH-1000XM5"), 1.0);
    }

    #[test]
    fn case_and_punctuation_do_not_matter() {
        assert_eq!(similarity("Sony WH-1000XM5", "sony wh_1000xm5!"), 1.0);
    }

    #[test]
    fn word_order_does_not_matter() {
        assert_eq!(similarity("Shimano Disc Rotor", "Rotor Disc Shimano"), 1.0);
    }

    #[test]
    fn short_tokens_are_discarded() {
        // "M" and "L" are dropped, leaving identical {shirt, pink} sets
        assert_eq!(similarity("T-Shirt Pink M", "T-Shirt Pink L"), 1.0);
    }

    #[test]
    fn partial_overlap_scores_between_zero_and_one() {
        // {sony, 1000xm5} vs {sony, 1000xm5b} -> 1/3
        let score = similarity("Sony WH-1000XM5", "Sony WH-1000XM5B");
        assert!((score - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_names_score_zero() {
        assert_eq!(similarity("Kettenpeitsche", "Fleece Jacket"), 0.0);
    }

    #[test]
    fn empty_union_scores_zero_not_nan() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("a b", "x-y"), 0.0);
        assert_eq!(similarity("!!", "??"), 0.0);
    }

    proptest! {
        #[test]
        fn symmetric_for_arbitrary_input(a in ".{0,40}", b in ".{0,40}") {
            prop_assert_eq!(similarity(&a, &b), similarity(&b, &a));
        }

        #[test]
        fn self_similarity_is_one_with_informative_token(word in "[a-z]{3,12}") {
            prop_assert_eq!(similarity(&word, &word), 1.0);
        }

        #[test]
        fn bounded_between_zero_and_one(a in ".{0,40}", b in ".{0,40}") {
            let score = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
