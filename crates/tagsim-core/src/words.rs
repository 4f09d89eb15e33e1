// SPDX-License-Identifier: GPL-3.0-or-later

//! Word-level similarity for multi-word tag values such as titles and names.
//!
//! Each word of the shorter value is paired with its best-scoring word in the
//! longer value. Strong pairs (above [`CONSUME_THRESHOLD`]) use up their
//! partner; whatever is left over in the longer value counts against the
//! score at [`UNMATCHED_WORD_PENALTY`] per word.

use crate::similarity::{Similarity, SimilarityScorer};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_SEPARATOR: Regex = Regex::new(r"\W+").expect("word separator regex is valid");
}

/// Pair score above which the matched word is removed from the candidates.
pub const CONSUME_THRESHOLD: f32 = 0.6;

/// Weight given to each word of the longer value that was never consumed.
pub const UNMATCHED_WORD_PENALTY: f32 = 0.4;

/// Lower-cased words of `value`, split on runs of non-word characters.
pub fn split_words(value: &str) -> Vec<String> {
    WORD_SEPARATOR
        .split(&value.to_lowercase())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Word-level similarity using the default scorer.
pub fn word_similarity(left: &str, right: &str) -> f32 {
    word_similarity_with(&SimilarityScorer, left, right)
}

/// Word-level similarity using `scorer` to compare individual words.
pub fn word_similarity_with<S: Similarity + ?Sized>(scorer: &S, left: &str, right: &str) -> f32 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 1.0;
    }

    let mut shorter = split_words(left);
    let mut longer = split_words(right);
    if shorter.is_empty() || longer.is_empty() {
        return 0.0;
    }
    if shorter.len() > longer.len() {
        std::mem::swap(&mut shorter, &mut longer);
    }

    let mut total = 0.0_f32;
    for word in &shorter {
        let mut best_score = 0.0_f32;
        let mut best_position = None;

        for (position, candidate) in longer.iter().enumerate() {
            let score = scorer.score(word, candidate);
            if score > best_score {
                best_score = score;
                best_position = Some(position);
            }
        }

        if let Some(position) = best_position {
            total += best_score;
            if best_score > CONSUME_THRESHOLD {
                longer.remove(position);
            }
        }
    }

    total / (shorter.len() as f32 + longer.len() as f32 * UNMATCHED_WORD_PENALTY)
}
