//! Puck line (-1.5/+1.5) prediction model.

use serde::{Deserialize, Serialize};

use super::adjustments::Confidence;
use super::poisson::poisson_prob;
use crate::market::american_to_implied;

/// Historical-blend tiers: (minimum samples, model weight, empirical weight).
/// Checked in order; larger samples shift weight toward the observed cover
/// rate.
const BLEND_TIERS: &[(usize, f64, f64, Confidence)] = &[
    (10, 0.6, 0.4, Confidence::High),
    (5, 0.75, 0.25, Confidence::Medium),
];

/// Puck line prediction results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuckLinePrediction {
    /// Probability the home side covers -1.5 (wins by 2+).
    pub home_minus_1_5: f64,
    /// Probability the away side covers +1.5 (loses by 1, ties, or wins).
    pub away_plus_1_5: f64,
    /// Expected home margin.
    pub expected_margin: f64,
    pub confidence: Confidence,
}

/// Predict puck line outcomes.
///
/// Double Poisson enumeration over score pairs; the home side covers when
/// the margin is 2+. Regulation ties go to OT, where the final margin is a
/// single goal, so tied score pairs count toward the +1.5 side. When margin
/// history is supplied the model probability is blended with the empirical
/// cover rate per `BLEND_TIERS`.
pub fn predict_puck_line(
    home_xg: f64,
    away_xg: f64,
    home_margin_history: Option<&[i32]>,
    max_goals: u32,
) -> PuckLinePrediction {
    let mut home_cover = 0.0;
    let mut away_cover = 0.0;

    for h in 0..=max_goals {
        let home_prob = poisson_prob(home_xg, h as i32);
        for a in 0..=max_goals {
            let away_prob = poisson_prob(away_xg, a as i32);
            let combined = home_prob * away_prob;
            let margin = h as i32 - a as i32;

            if margin >= 2 {
                home_cover += combined;
            } else {
                away_cover += combined;
            }
        }
    }

    let mut confidence = Confidence::Low;
    if let Some(history) = home_margin_history {
        for &(min_samples, model_w, empirical_w, tier_confidence) in BLEND_TIERS {
            if history.len() >= min_samples {
                let hist_cover_rate =
                    history.iter().filter(|&&m| m >= 2).count() as f64 / history.len() as f64;
                home_cover = model_w * home_cover + empirical_w * hist_cover_rate;
                away_cover = 1.0 - home_cover;
                confidence = tier_confidence;
                break;
            }
        }
    }

    PuckLinePrediction {
        home_minus_1_5: home_cover,
        away_plus_1_5: away_cover,
        expected_margin: home_xg - away_xg,
        confidence,
    }
}

/// Margin distribution summary for one team's completed games.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarginDistribution {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub ties_to_ot: usize,
    pub win_by_2_plus: usize,
    pub win_by_1: usize,
    pub lose_by_1: usize,
    pub lose_by_2_plus: usize,
    pub cover_minus_1_5_rate: f64,
    pub avg_win_margin: f64,
    pub avg_loss_margin: f64,
}

/// Summarize a team's historical win margins (positive = wins).
pub fn analyze_margin_distribution(margins: &[i32]) -> MarginDistribution {
    if margins.is_empty() {
        return MarginDistribution::default();
    }

    let wins: Vec<i32> = margins.iter().copied().filter(|&m| m > 0).collect();
    let losses: Vec<i32> = margins.iter().copied().filter(|&m| m < 0).collect();

    MarginDistribution {
        games: margins.len(),
        wins: wins.len(),
        losses: losses.len(),
        ties_to_ot: margins.iter().filter(|&&m| m == 0).count(),
        win_by_2_plus: wins.iter().filter(|&&m| m >= 2).count(),
        win_by_1: wins.iter().filter(|&&m| m == 1).count(),
        lose_by_1: losses.iter().filter(|&&m| m == -1).count(),
        lose_by_2_plus: losses.iter().filter(|&&m| m <= -2).count(),
        cover_minus_1_5_rate: margins.iter().filter(|&&m| m >= 2).count() as f64
            / margins.len() as f64,
        avg_win_margin: if wins.is_empty() {
            0.0
        } else {
            wins.iter().sum::<i32>() as f64 / wins.len() as f64
        },
        avg_loss_margin: if losses.is_empty() {
            0.0
        } else {
            losses.iter().sum::<i32>() as f64 / losses.len() as f64
        },
    }
}

/// Edge analysis for one side of the puck line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PuckLineSideValue {
    pub model_prob: f64,
    pub implied_prob: f64,
    pub edge: f64,
    pub has_value: bool,
}

/// Betting value on both puck line sides against book odds.
pub fn puck_line_value(
    prediction: &PuckLinePrediction,
    home_minus_1_5_odds: i32,
    away_plus_1_5_odds: i32,
) -> (PuckLineSideValue, PuckLineSideValue) {
    let home_implied = american_to_implied(home_minus_1_5_odds);
    let away_implied = american_to_implied(away_plus_1_5_odds);

    let home_edge = prediction.home_minus_1_5 - home_implied;
    let away_edge = prediction.away_plus_1_5 - away_implied;

    (
        PuckLineSideValue {
            model_prob: prediction.home_minus_1_5,
            implied_prob: home_implied,
            edge: home_edge,
            has_value: home_edge > 0.02,
        },
        PuckLineSideValue {
            model_prob: prediction.away_plus_1_5,
            implied_prob: away_implied,
            edge: away_edge,
            has_value: away_edge > 0.02,
        },
    )
}
