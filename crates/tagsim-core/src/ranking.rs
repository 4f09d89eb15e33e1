// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordering candidates by similarity and picking the best one.

use std::cmp::Ordering;

use tracing::debug;

/// Anything carrying a similarity score.
pub trait Scored {
    fn similarity(&self) -> f32;
}

/// A candidate paired with the score it was given.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<T> {
    pub similarity: f32,
    pub candidate: T,
}

impl<T> ScoredCandidate<T> {
    pub fn new(candidate: T, similarity: f32) -> Self {
        Self {
            similarity,
            candidate,
        }
    }
}

impl<T> Scored for ScoredCandidate<T> {
    fn similarity(&self) -> f32 {
        self.similarity
    }
}

/// Outcome of [`find_best_match`].
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch<T> {
    /// Score of `result`.
    pub similarity: f32,
    /// Highest-scoring candidate, or the `no_match` placeholder.
    pub result: T,
    /// How many candidates were considered.
    pub num_results: usize,
}

/// Sort candidates by descending similarity. Ties keep their input order.
pub fn sort_by_similarity<T, I>(candidates: I) -> Vec<T>
where
    T: Scored,
    I: IntoIterator<Item = T>,
{
    let mut sorted: Vec<T> = candidates.into_iter().collect();
    sorted.sort_by(|left, right| {
        right
            .similarity()
            .partial_cmp(&left.similarity())
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

/// Pick the highest-scoring candidate, falling back to `no_match` when there are none.
pub fn find_best_match<T, I>(candidates: I, no_match: T) -> BestMatch<T>
where
    T: Scored,
    I: IntoIterator<Item = T>,
{
    let sorted = sort_by_similarity(candidates);
    let num_results = sorted.len();
    let result = sorted.into_iter().next().unwrap_or(no_match);

    BestMatch {
        similarity: result.similarity(),
        result,
        num_results,
    }
}

/// Best candidate if its similarity reaches `threshold`.
pub fn match_above_threshold<T, I>(candidates: I, threshold: f32) -> Option<BestMatch<T>>
where
    T: Scored,
    I: IntoIterator<Item = T>,
{
    let sorted = sort_by_similarity(candidates);
    let num_results = sorted.len();
    let result = sorted.into_iter().next()?;
    let similarity = result.similarity();

    if similarity < threshold {
        debug!(
            target: "matching",
            similarity,
            threshold,
            num_results,
            "best candidate below threshold"
        );
        return None;
    }

    Some(BestMatch {
        similarity,
        result,
        num_results,
    })
}
