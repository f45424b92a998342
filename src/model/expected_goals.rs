//! Expected goals estimation from team rate statistics.

use serde::{Deserialize, Serialize};

use crate::domain::TeamMetrics;

/// Goal boost applied to the home offense (15%).
pub const DEFAULT_HOME_ADVANTAGE: f64 = 0.15;

/// Neither side scores fewer than this in expectation.
pub const XG_FLOOR: f64 = 0.5;

/// Additive expected-goals adjustments (injuries, goalie matchup,
/// back-to-back), one value per side.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct XgAdjustments {
    pub home: f64,
    pub away: f64,
}

/// Calculate expected goals for each team.
///
/// Each side's rate is the average of its offense and the opponent's
/// defense. The home side gets the full `home_advantage` boost while the
/// away side is penalized by half of it — the road penalty is deliberately
/// smaller than the home boost. Optional adjustments are added before both
/// values are floored at 0.5.
pub fn calculate_expected_goals(
    home: &TeamMetrics,
    away: &TeamMetrics,
    home_advantage: f64,
    adjustments: Option<XgAdjustments>,
) -> (f64, f64) {
    // Home offense vs away defense
    let mut home_xg = (home.goals_for_pg + away.goals_against_pg) / 2.0;
    home_xg *= 1.0 + home_advantage;

    // Away offense vs home defense, with the road penalty
    let mut away_xg = (away.goals_for_pg + home.goals_against_pg) / 2.0;
    away_xg *= 1.0 - home_advantage / 2.0;

    if let Some(adj) = adjustments {
        home_xg += adj.home;
        away_xg += adj.away;
    }

    (home_xg.max(XG_FLOOR), away_xg.max(XG_FLOOR))
}

/// Expected goals with the default home advantage and no adjustments.
pub fn expected_goals(home: &TeamMetrics, away: &TeamMetrics) -> (f64, f64) {
    calculate_expected_goals(home, away, DEFAULT_HOME_ADVANTAGE, None)
}

/// Expected total goals for the game.
pub fn calculate_total_xg(home_xg: f64, away_xg: f64) -> f64 {
    home_xg + away_xg
}
