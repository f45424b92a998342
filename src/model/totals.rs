//! Over/under total goals predictions.

use serde::{Deserialize, Serialize};

use super::poisson::poisson_prob;

/// Prediction for game totals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TotalsPrediction {
    pub expected_total: f64,
    pub over_prob: f64,
    pub under_prob: f64,
    /// Nonzero only on whole-number lines.
    pub push_prob: f64,
}

/// Over/under probabilities against a totals line.
///
/// Combined scoring is modeled as a single Poisson on `home_xg + away_xg`;
/// mass below the line goes under, mass exactly on an integer line is a
/// push, and the remainder is over.
pub fn predict_total(home_xg: f64, away_xg: f64, line: f64) -> TotalsPrediction {
    let total_xg = home_xg + away_xg;

    let mut under_prob = 0.0;
    let mut push_prob = 0.0;

    for goals in 0..=(line.floor() as i32) {
        let prob = poisson_prob(total_xg, goals);
        if (goals as f64) < line {
            under_prob += prob;
        } else {
            push_prob = prob;
        }
    }

    TotalsPrediction {
        expected_total: total_xg,
        over_prob: 1.0 - under_prob - push_prob,
        under_prob,
        push_prob,
    }
}
