// SPDX-License-Identifier: GPL-3.0-or-later

//! Approximate string comparison for music metadata matching.
//!
//! This crate provides:
//! - A normalized similarity score built on a restricted Damerau-Levenshtein distance
//! - Word-level similarity for multi-word tag values
//! - Weighted combination of partial scores and whole-track tag comparison
//! - Ranking of scored candidates with threshold filtering
//!
//! Everything here is synchronous and free of shared state. Callers running
//! inside an async runtime should move large batches onto a blocking thread.

pub mod distance;
pub mod error;
pub mod metadata;
pub mod ranking;
pub mod similarity;
pub mod weights;
pub mod words;

pub use distance::{edit_distance, DistanceMatrix};
pub use error::{Result, ScoringError};
pub use metadata::{ComparisonWeights, TagWeight, TrackMetadata, LENGTH_TAG};
pub use ranking::{
    find_best_match, match_above_threshold, sort_by_similarity, BestMatch, Scored, ScoredCandidate,
};
pub use similarity::{similarity, similarity_chars, Similarity, SimilarityScorer};
pub use weights::{length_score, linear_combination_of_weights, LENGTH_SCORE_THRESHOLD_MS};
pub use words::{split_words, word_similarity, word_similarity_with};
