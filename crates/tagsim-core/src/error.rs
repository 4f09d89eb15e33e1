// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors raised when combining partial scores.
///
/// The string comparison itself never fails; only caller-supplied values and
/// weights can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    #[error("score value {0} is below 0.0")]
    ValueBelowZero(f32),

    #[error("score value {0} is above 1.0")]
    ValueAboveOne(f32),

    #[error("weight {0} is negative")]
    NegativeWeight(f32),

    #[error("non-finite number in score part ({value}, {weight})")]
    NonFinite { value: f32, weight: f32 },
}
