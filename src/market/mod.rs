//! Odds conversion and betting-value math.
//!
//! Pure, stateless functions: American/decimal/implied conversions, edge
//! against the book, capped Kelly sizing, and expected value. Degenerate
//! inputs (probability outside (0, 1)) return 0 sentinels rather than
//! erroring; callers treat 0 as "no signal".

use serde::{Deserialize, Serialize};

/// Minimum edge for a bet to be flagged as having value (2%).
pub const MIN_VALUE_EDGE: f64 = 0.02;

/// Hard cap on the Kelly fraction (quarter Kelly of full bankroll).
pub const KELLY_CAP: f64 = 0.25;

/// Recommendation label derived from the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetRating {
    NoBet,
    SmallEdge,
    GoodValue,
    StrongValue,
}

impl std::fmt::Display for BetRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetRating::NoBet => write!(f, "No bet"),
            BetRating::SmallEdge => write!(f, "Small edge"),
            BetRating::GoodValue => write!(f, "Good value"),
            BetRating::StrongValue => write!(f, "Strong value"),
        }
    }
}

impl BetRating {
    /// Rating thresholds: <2% no bet, <5% small, <10% good, else strong.
    pub fn from_edge(edge: f64) -> Self {
        if edge < 0.02 {
            BetRating::NoBet
        } else if edge < 0.05 {
            BetRating::SmallEdge
        } else if edge < 0.10 {
            BetRating::GoodValue
        } else {
            BetRating::StrongValue
        }
    }
}

/// Edge metrics for one candidate bet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeResult {
    /// Model's win probability (0-1).
    pub model_prob: f64,
    /// Probability implied by the book's odds (0-1).
    pub implied_prob: f64,
    /// Edge in percentage points (model - implied, x100).
    pub edge_pct: f64,
    /// Capped Kelly fraction in [0, 0.25].
    pub kelly_fraction: f64,
    pub has_value: bool,
    pub bet_rating: BetRating,
}

/// Convert American odds to implied probability.
///
/// `american_to_implied(-150)` == 0.6, `american_to_implied(150)` == 0.4.
pub fn american_to_implied(odds: i32) -> f64 {
    if odds > 0 {
        100.0 / (odds as f64 + 100.0)
    } else {
        odds.abs() as f64 / (odds.abs() as f64 + 100.0)
    }
}

/// Convert implied probability to American odds.
///
/// Returns 0 for probabilities outside (0, 1).
pub fn implied_to_american(probability: f64) -> i32 {
    if probability <= 0.0 || probability >= 1.0 {
        return 0;
    }
    if probability >= 0.5 {
        (-100.0 * probability / (1.0 - probability)) as i32
    } else {
        (100.0 * (1.0 - probability) / probability) as i32
    }
}

/// Convert American odds to decimal odds.
pub fn american_to_decimal(odds: i32) -> f64 {
    if odds > 0 {
        (odds as f64 / 100.0) + 1.0
    } else {
        (100.0 / odds.abs() as f64) + 1.0
    }
}

/// Convert decimal odds to American odds.
pub fn decimal_to_american(decimal_odds: f64) -> i32 {
    if decimal_odds >= 2.0 {
        ((decimal_odds - 1.0) * 100.0) as i32
    } else {
        (-100.0 / (decimal_odds - 1.0)) as i32
    }
}

/// Betting edge and Kelly sizing against book odds.
///
/// Kelly fraction is `(d*p - 1) / (d - 1)` for decimal odds `d`, clamped to
/// [0, 0.25]; zero whenever the edge is non-positive.
pub fn calculate_edge(model_prob: f64, book_odds: i32) -> EdgeResult {
    let implied_prob = american_to_implied(book_odds);
    let edge = model_prob - implied_prob;

    let kelly = if edge > 0.0 {
        let decimal_odds = american_to_decimal(book_odds);
        let raw = (decimal_odds * model_prob - 1.0) / (decimal_odds - 1.0);
        raw.clamp(0.0, KELLY_CAP)
    } else {
        0.0
    };

    EdgeResult {
        model_prob,
        implied_prob,
        edge_pct: edge * 100.0,
        kelly_fraction: kelly,
        has_value: edge > MIN_VALUE_EDGE,
        bet_rating: BetRating::from_edge(edge),
    }
}

/// Expected value of a bet in stake units.
pub fn calculate_ev(model_prob: f64, book_odds: i32, stake: f64) -> f64 {
    let decimal_odds = american_to_decimal(book_odds);
    let win_amount = stake * (decimal_odds - 1.0);
    (model_prob * win_amount) - ((1.0 - model_prob) * stake)
}

/// Win rate required to break even at the given odds.
pub fn breakeven_probability(american_odds: i32) -> f64 {
    american_to_implied(american_odds)
}

/// The book's juice/vig percentage on a two-way market.
pub fn juice_percentage(home_odds: i32, away_odds: i32) -> f64 {
    let total_implied = american_to_implied(home_odds) + american_to_implied(away_odds);
    (total_implied - 1.0) * 100.0
}
