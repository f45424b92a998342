//! Poisson win probability model.
//!
//! Scores each (home, away) goal pair independently from two expected-goals
//! inputs and buckets the mass into regulation win / loss / tie, then splits
//! ties using a home overtime advantage. The model must be:
//! 1. Calibrated (predicted probabilities match actual outcomes)
//! 2. More accurate than the market's implied probabilities
//! 3. Deterministic — identical inputs give identical outputs

use serde::{Deserialize, Serialize};

/// Home team's share of games decided in OT/SO.
pub const DEFAULT_HOME_OT_ADVANTAGE: f64 = 0.52;

/// Goals-per-team ceiling for the enumeration. Tail mass above this is
/// negligible for NHL scoring rates.
pub const DEFAULT_MAX_GOALS: u32 = 10;

/// Probabilities for game outcomes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameProbabilities {
    /// Total home win probability (regulation + OT).
    pub home_win: f64,
    /// Total away win probability (regulation + OT).
    pub away_win: f64,
    /// Home win in regulation.
    pub home_regulation: f64,
    /// Away win in regulation.
    pub away_regulation: f64,
    /// Probability the game is tied after regulation.
    pub overtime: f64,
}

/// Poisson probability P(X = k) for X ~ Poisson(expected).
///
/// Returns 0.0 for negative k.
pub fn poisson_prob(expected: f64, k: i32) -> f64 {
    if k < 0 {
        return 0.0;
    }
    let mut factorial = 1.0;
    for i in 1..=k {
        factorial *= i as f64;
    }
    ((-expected).exp() * expected.powi(k)) / factorial
}

/// Calculate win probabilities from expected goals.
///
/// Enumerates every (h, a) score pair in `[0, max_goals]²`, weighting by the
/// product of the two independent Poisson masses, then splits the tied mass
/// into OT/SO win shares using `home_ot_advantage`.
///
/// `calculate_win_probability(3.2, 2.8, ...)` gives `home_win` ≈ 0.5623.
pub fn calculate_win_probability(
    home_xg: f64,
    away_xg: f64,
    home_ot_advantage: f64,
    max_goals: u32,
) -> GameProbabilities {
    let mut home_reg_win = 0.0;
    let mut away_reg_win = 0.0;
    let mut tie_prob = 0.0;

    for h in 0..=max_goals {
        let home_prob = poisson_prob(home_xg, h as i32);
        for a in 0..=max_goals {
            let away_prob = poisson_prob(away_xg, a as i32);
            let combined = home_prob * away_prob;

            if h > a {
                home_reg_win += combined;
            } else if a > h {
                away_reg_win += combined;
            } else {
                tie_prob += combined;
            }
        }
    }

    let ot_home_win = tie_prob * home_ot_advantage;
    let ot_away_win = tie_prob * (1.0 - home_ot_advantage);

    GameProbabilities {
        home_win: home_reg_win + ot_home_win,
        away_win: away_reg_win + ot_away_win,
        home_regulation: home_reg_win,
        away_regulation: away_reg_win,
        overtime: tie_prob,
    }
}

/// Win probabilities with the default OT advantage and goal ceiling.
pub fn win_probability(home_xg: f64, away_xg: f64) -> GameProbabilities {
    calculate_win_probability(home_xg, away_xg, DEFAULT_HOME_OT_ADVANTAGE, DEFAULT_MAX_GOALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poisson_prob_basics() {
        // P(X=0) for lambda=3 is e^-3
        assert!((poisson_prob(3.0, 0) - (-3.0f64).exp()).abs() < 1e-12);
        // Negative k carries no mass
        assert_eq!(poisson_prob(3.0, -1), 0.0);
        // Mass sums to ~1 over a generous range
        let total: f64 = (0..60).map(|k| poisson_prob(3.0, k)).sum();
        assert!((total - 1.0).abs() < 1e-9, "Poisson mass should sum to 1, got {}", total);
    }

    #[test]
    fn test_win_probs_sum_to_one() {
        for (h, a) in [(3.2, 2.8), (2.5, 2.5), (4.1, 1.9), (0.5, 0.5)] {
            let probs = win_probability(h, a);
            assert!(
                (probs.home_win + probs.away_win - 1.0).abs() < 1e-3,
                "home_win + away_win should be ~1.0 for xg ({}, {})",
                h,
                a
            );
            let parts = probs.home_regulation + probs.away_regulation + probs.overtime;
            assert!((parts - 1.0).abs() < 1e-3, "regulation + OT mass should be ~1.0");
        }
    }

    #[test]
    fn test_reference_scenario() {
        // xG 3.2 vs 2.8 is a moderate home favorite
        let probs = win_probability(3.2, 2.8);
        assert!(
            (probs.home_win - 0.5623).abs() < 0.001,
            "home_win should be ~0.5623, got {:.4}",
            probs.home_win
        );
    }

    #[test]
    fn test_even_matchup_favors_home_in_ot_only() {
        let probs = win_probability(3.0, 3.0);
        // Regulation is symmetric; the OT advantage is the only home edge
        assert!((probs.home_regulation - probs.away_regulation).abs() < 1e-9);
        assert!(probs.home_win > probs.away_win);
    }

    #[test]
    fn test_monotonic_in_home_xg() {
        let mut last = 0.0;
        for home_xg in [2.0, 2.5, 3.0, 3.5, 4.0] {
            let probs = win_probability(home_xg, 2.8);
            assert!(
                probs.home_win > last,
                "home_win should increase with home_xg: {} -> {}",
                last,
                probs.home_win
            );
            last = probs.home_win;
        }
    }

    #[test]
    fn test_idempotent() {
        let a = win_probability(3.2, 2.8);
        let b = win_probability(3.2, 2.8);
        assert_eq!(a.home_win.to_bits(), b.home_win.to_bits());
        assert_eq!(a.overtime.to_bits(), b.overtime.to_bits());
    }
}
