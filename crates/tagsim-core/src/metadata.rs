// SPDX-License-Identifier: GPL-3.0-or-later

//! Comparing two sets of track tags.
//!
//! Each weighted tag present on both sides contributes a partial score:
//! counter tags (track/disc numbers and totals) must match exactly, text tags
//! go through [`word_similarity`]. A tag explicitly deleted on one side while
//! set on the other counts as a full mismatch. Track length contributes via
//! [`length_score`]. Parts are merged with [`linear_combination_of_weights`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::weights::{length_score, linear_combination_of_weights};
use crate::words::word_similarity;

/// Pseudo-tag naming the track length in ignore lists.
pub const LENGTH_TAG: &str = "~length";

const COUNTER_TAGS: [&str; 4] = ["tracknumber", "totaltracks", "discnumber", "totaldiscs"];

/// Weight of one tag in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagWeight {
    pub tag: String,
    pub weight: f32,
}

impl TagWeight {
    pub fn new(tag: impl Into<String>, weight: f32) -> Self {
        Self {
            tag: tag.into(),
            weight,
        }
    }
}

/// Per-tag weights plus the weight given to track length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonWeights {
    pub tags: Vec<TagWeight>,
    pub length: f32,
}

impl Default for ComparisonWeights {
    fn default() -> Self {
        Self {
            tags: vec![
                TagWeight::new("title", 22.0),
                TagWeight::new("artist", 6.0),
                TagWeight::new("album", 12.0),
                TagWeight::new("tracknumber", 6.0),
                TagWeight::new("totaltracks", 5.0),
                TagWeight::new("discnumber", 5.0),
                TagWeight::new("totaldiscs", 4.0),
            ],
            length: 8.0,
        }
    }
}

/// Tags of one track as read from a file or a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    /// Tags the user removed; they count as known-empty rather than unknown.
    #[serde(default)]
    pub deleted_tags: BTreeSet<String>,
    /// Track length in milliseconds.
    #[serde(default)]
    pub length_ms: Option<u64>,
}

impl TrackMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn with_length(mut self, length_ms: u64) -> Self {
        self.length_ms = Some(length_ms);
        self
    }

    /// Set a tag, clearing any earlier deletion of it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.deleted_tags.remove(&name);
        self.tags.insert(name, value.into());
    }

    /// Remove a tag and remember that it was deleted.
    pub fn delete(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.tags.remove(&name);
        self.deleted_tags.insert(name);
    }

    /// Non-empty value of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tags
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_deleted(&self, name: &str) -> bool {
        self.deleted_tags.contains(name)
    }

    /// Similarity of `self` and `other` in `[0.0, 1.0]`.
    ///
    /// Tags listed in `ignored` (and [`LENGTH_TAG`] for the track length) are
    /// left out. Fails only if `weights` holds a negative or non-finite weight.
    pub fn compare(
        &self,
        other: &TrackMetadata,
        weights: &ComparisonWeights,
        ignored: &[String],
    ) -> Result<f32> {
        let is_ignored = |name: &str| ignored.iter().any(|tag| tag == name);
        let mut parts = Vec::with_capacity(weights.tags.len() + 1);

        if let (Some(a), Some(b)) = (self.length_ms, other.length_ms) {
            if a > 0 && b > 0 && !is_ignored(LENGTH_TAG) {
                parts.push((length_score(a, b), weights.length));
            }
        }

        for TagWeight { tag, weight } in &weights.tags {
            if is_ignored(tag.as_str()) {
                continue;
            }

            match (self.get(tag), other.get(tag)) {
                (Some(a), Some(b)) => parts.push((tag_score(tag, a, b), *weight)),
                (Some(_), None) if other.is_deleted(tag) => parts.push((0.0, *weight)),
                (None, Some(_)) if self.is_deleted(tag) => parts.push((0.0, *weight)),
                _ => {}
            }
        }

        let score = linear_combination_of_weights(&parts)?;
        debug!(target: "matching", parts = parts.len(), score, "compared track metadata");
        Ok(score)
    }
}

fn tag_score(tag: &str, a: &str, b: &str) -> f32 {
    if COUNTER_TAGS.contains(&tag) {
        let equal = match (a.trim().parse::<i64>(), b.trim().parse::<i64>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        };
        return if equal { 1.0 } else { 0.0 };
    }
    word_similarity(a, b)
}
