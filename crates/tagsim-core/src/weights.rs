// SPDX-License-Identifier: GPL-3.0-or-later

//! Combining partial scores into one probability-like value.

use crate::error::{Result, ScoringError};

/// Length difference (ms) at which [`length_score`] bottoms out at `0.0`.
pub const LENGTH_SCORE_THRESHOLD_MS: u64 = 30_000;

/// Weighted mean of `(value, weight)` parts.
///
/// Values must lie in `[0.0, 1.0]` and weights must be non-negative. When the
/// weights sum to zero (including an empty slice) the result is `0.0`.
pub fn linear_combination_of_weights(parts: &[(f32, f32)]) -> Result<f32> {
    let mut total = 0.0_f32;
    let mut sum_of_products = 0.0_f32;

    for &(value, weight) in parts {
        if !value.is_finite() || !weight.is_finite() {
            return Err(ScoringError::NonFinite { value, weight });
        }
        if value < 0.0 {
            return Err(ScoringError::ValueBelowZero(value));
        }
        if value > 1.0 {
            return Err(ScoringError::ValueAboveOne(value));
        }
        if weight < 0.0 {
            return Err(ScoringError::NegativeWeight(weight));
        }
        total += weight;
        sum_of_products += value * weight;
    }

    if total == 0.0 {
        return Ok(0.0);
    }
    Ok(sum_of_products / total)
}

/// Closeness of two track lengths in milliseconds.
///
/// Equal lengths score `1.0`, falling linearly to `0.0` once they differ by
/// [`LENGTH_SCORE_THRESHOLD_MS`] or more.
pub fn length_score(a_ms: u64, b_ms: u64) -> f32 {
    let difference = a_ms.abs_diff(b_ms).min(LENGTH_SCORE_THRESHOLD_MS);
    1.0 - difference as f32 / LENGTH_SCORE_THRESHOLD_MS as f32
}
