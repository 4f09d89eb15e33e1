// SPDX-License-Identifier: GPL-3.0-or-later

//! Normalized approximate string comparison.
//!
//! Scores are `1 - distance / max(len1, len2)` where `distance` is the
//! restricted edit distance from [`crate::distance`]. Comparison runs on
//! Unicode scalar values (`char`), never on UTF-8 bytes, so `"é"` matches
//! `"é"` regardless of its encoded width.
//!
//! An empty input on either side scores `0.0`: there is nothing to compare,
//! and it keeps `max(len1, len2)` away from zero.

use crate::distance::edit_distance;

/// Source of similarity scores in `[0.0, 1.0]`.
///
/// Matching helpers take any implementation so callers can swap the metric.
pub trait Similarity {
    fn score(&self, left: &str, right: &str) -> f32;
}

/// Default scorer backed by [`similarity`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarityScorer;

impl Similarity for SimilarityScorer {
    fn score(&self, left: &str, right: &str) -> f32 {
        similarity(left, right)
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f32,
{
    fn score(&self, left: &str, right: &str) -> f32 {
        self(left, right)
    }
}

/// Similarity of two strings, compared code point by code point.
pub fn similarity(left: &str, right: &str) -> f32 {
    let left: Vec<char> = left.chars().collect();
    let right: Vec<char> = right.chars().collect();
    similarity_chars(&left, &right)
}

/// Similarity of two already-decoded code-point sequences.
pub fn similarity_chars(left: &[char], right: &[char]) -> f32 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }

    let distance = edit_distance(left, right) as f32;
    let longest = left.len().max(right.len()) as f32;
    1.0 - distance / longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identical_strings_score_one() {
        assert_eq!(similarity("Abbey Road", "Abbey Road"), 1.0);
        assert_eq!(similarity("x", "x"), 1.0);
    }

    #[test]
    fn empty_inputs_score_zero() {
        assert_eq!(similarity("", ""), 0.0);
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn single_substitution() {
        assert_close(similarity("kitten", "sitten"), 1.0 - 1.0 / 6.0);
    }

    #[test]
    fn kitten_sitting() {
        assert_close(similarity("kitten", "sitting"), 1.0 - 3.0 / 7.0);
    }

    #[test]
    fn two_character_swap_is_not_a_transposition() {
        assert_eq!(similarity("ab", "ba"), 0.0);
    }

    #[test]
    fn later_swap_is_a_transposition() {
        assert_close(similarity("abcd", "acbd"), 0.75);
    }

    #[test]
    fn completely_different_strings_score_zero() {
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    #[test]
    fn compares_code_points_not_bytes() {
        // 'é' is two bytes in UTF-8 but one code point.
        assert_eq!(similarity("café", "café"), 1.0);
        assert_close(similarity("café", "cafe"), 0.75);
        assert_close(similarity("Motörhead", "Motorhead"), 1.0 - 1.0 / 9.0);
        assert_close(similarity("東京事変", "東京時変"), 0.75);
    }

    #[test]
    fn case_is_significant() {
        assert_close(similarity("Queen", "queen"), 0.8);
    }

    #[test]
    fn symmetric_for_sample_pairs() {
        let pairs = [
            ("kitten", "sitting"),
            ("abcd", "acbd"),
            ("Björk", "Bjork"),
            ("The Beatles", "Beatles, The"),
        ];
        for (left, right) in pairs {
            assert_eq!(similarity(left, right), similarity(right, left));
        }
    }

    #[test]
    fn scorer_and_closures_implement_similarity() {
        assert_eq!(SimilarityScorer.score("abc", "abc"), 1.0);
        let constant = |_: &str, _: &str| 0.5_f32;
        assert_eq!(constant.score("a", "b"), 0.5);
    }
}
