// zilkara-common/src/scoring/stability.rs
// Stability score: linear inverse of the mean absolute price change.

use serde::{Deserialize, Serialize};

use crate::data::types::{Rating, Regime};

/// Score points lost per percent of mean absolute change.
const VOLATILITY_PENALTY: f64 = 2.0;
const MAX_SCORE: f64 = 100.0;

const RATING_A_MIN: u8 = 80;
const RATING_B_MIN: u8 = 60;
const RATING_C_MIN: u8 = 40;

const REGIME_STABLE_MIN: u8 = 70;
const REGIME_TRANSITION_MIN: u8 = 50;

/// Full classification of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityAssessment {
    pub score: u8,
    pub rating: Rating,
    pub regime: Regime,
}

impl StabilityAssessment {
    pub fn from_changes(chg_24h: Option<f64>, chg_7d: Option<f64>, chg_30d: Option<f64>) -> Self {
        Self::from_score(stability_score(chg_24h, chg_7d, chg_30d))
    }

    pub fn from_score(score: u8) -> Self {
        Self {
            score,
            rating: Rating::from_score(score),
            regime: Regime::from_score(score),
        }
    }
}

/// Computes the 0-100 stability score from the 24h, 7d and 30d changes (percent).
///
/// Absent or non-finite changes count as 0. The result is clamped before
/// rounding so it can never leave `[0, 100]`.
pub fn stability_score(chg_24h: Option<f64>, chg_7d: Option<f64>, chg_30d: Option<f64>) -> u8 {
    let magnitude = |chg: Option<f64>| chg.filter(|v| v.is_finite()).map_or(0.0, f64::abs);

    let avg_volatility = (magnitude(chg_24h) + magnitude(chg_7d) + magnitude(chg_30d)) / 3.0;
    let raw = MAX_SCORE - avg_volatility * VOLATILITY_PENALTY;

    raw.clamp(0.0, MAX_SCORE).round() as u8
}

impl Rating {
    pub fn from_score(score: u8) -> Self {
        if score >= RATING_A_MIN {
            Rating::A
        } else if score >= RATING_B_MIN {
            Rating::B
        } else if score >= RATING_C_MIN {
            Rating::C
        } else {
            Rating::D
        }
    }
}

impl Regime {
    pub fn from_score(score: u8) -> Self {
        if score >= REGIME_STABLE_MIN {
            Regime::Stable
        } else if score >= REGIME_TRANSITION_MIN {
            Regime::Transition
        } else {
            Regime::Volatile
        }
    }
}
