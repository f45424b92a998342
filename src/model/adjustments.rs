//! Goalie and injury adjustments feeding the expected-goals estimator.
//!
//! Both produce additive goal deltas that callers fold into
//! [`XgAdjustments`](super::expected_goals::XgAdjustments).

use serde::{Deserialize, Serialize};

/// League average save percentage used as the goalie baseline.
pub const LEAGUE_AVG_SAVE_PCT: f64 = 0.905;

/// Shots per game assumed when translating SV% deltas into goals.
const SHOTS_PER_GAME: f64 = 30.0;

/// Confidence tier driven by sample size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

/// Adjustment to the opposing team's expected goals for a goalie matchup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalieAdjustment {
    pub goalie_name: String,
    pub save_pct: f64,
    /// Negative means fewer goals expected against this goalie.
    pub adjustment: f64,
    pub confidence: Confidence,
}

/// Goal adjustment for a goalie relative to league average.
///
/// Each 1% of SV% above/below average is worth about 0.3 goals over a
/// 30-shot game. Small samples are regressed toward zero.
pub fn calculate_goalie_adjustment(goalie_save_pct: f64, sample_size: u32) -> GoalieAdjustment {
    let diff_from_avg = goalie_save_pct - LEAGUE_AVG_SAVE_PCT;
    let base_adjustment = -diff_from_avg * SHOTS_PER_GAME;

    let (confidence, regression) = if sample_size < 10 {
        (Confidence::Low, 0.5)
    } else if sample_size < 20 {
        (Confidence::Medium, 0.75)
    } else {
        (Confidence::High, 1.0)
    };

    GoalieAdjustment {
        goalie_name: String::new(),
        save_pct: goalie_save_pct,
        adjustment: base_adjustment * regression,
        confidence,
    }
}

/// A team's expected goals adjusted for the opposing goalie.
pub fn adjusted_xg_for_matchup(
    base_team_xg: f64,
    opposing_goalie_sv_pct: f64,
    opposing_goalie_games: u32,
) -> f64 {
    let adj = calculate_goalie_adjustment(opposing_goalie_sv_pct, opposing_goalie_games);
    base_team_xg + adj.adjustment
}

/// Roster status reported by the injury feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjuryStatus {
    Healthy,
    Probable,
    Questionable,
    Doubtful,
    Out,
}

impl InjuryStatus {
    /// Whether the player is likely to dress.
    pub fn likely_playing(self) -> bool {
        matches!(self, InjuryStatus::Healthy | InjuryStatus::Probable)
    }
}

/// Player importance tier within the lineup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerTier {
    Critical,
    High,
    Medium,
    Low,
}

/// One entry from the injury report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryReport {
    pub team: String,
    pub player_name: String,
    /// Position code; only the first letter (C/W/D/G) matters.
    pub position: String,
    pub status: InjuryStatus,
    pub player_tier: PlayerTier,
}

/// Impact assessment for a team's injuries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjuryImpact {
    pub team: String,
    /// Expected goals-for reduction.
    pub offensive_impact: f64,
    /// Expected goals-against increase.
    pub defensive_impact: f64,
    /// Net goal differential change (always <= 0).
    pub net_impact: f64,
    pub key_injuries: Vec<String>,
}

/// Base goals-per-game impact by position and tier.
fn position_impact(position: char, tier: PlayerTier) -> f64 {
    match (position, tier) {
        ('G', PlayerTier::Critical) => 0.50,
        ('G', _) => 0.00,
        ('C', PlayerTier::Critical) => 0.35,
        ('C', PlayerTier::High) => 0.20,
        ('C', PlayerTier::Medium) => 0.10,
        ('C', PlayerTier::Low) => 0.03,
        ('W', PlayerTier::Critical) => 0.30,
        ('W', PlayerTier::High) => 0.18,
        ('W', PlayerTier::Medium) => 0.08,
        ('W', PlayerTier::Low) => 0.03,
        ('D', PlayerTier::Critical) => 0.25,
        ('D', PlayerTier::High) => 0.15,
        ('D', PlayerTier::Medium) => 0.08,
        ('D', PlayerTier::Low) => 0.03,
        _ => 0.05,
    }
}

/// Total impact of a team's injuries on expected performance.
///
/// Forwards reduce offense, goalies raise goals against, defensemen split
/// 30% offense / 70% defense. Critical and high-tier absences are listed as
/// key injuries.
pub fn calculate_injury_impact(injuries: &[InjuryReport]) -> InjuryImpact {
    let mut offensive_impact = 0.0;
    let mut defensive_impact = 0.0;
    let mut key_injuries = Vec::new();

    for injury in injuries {
        if injury.status.likely_playing() {
            continue;
        }

        let position = injury.position.chars().next().unwrap_or('W');
        let impact = position_impact(position, injury.player_tier);

        match position {
            'C' | 'W' => offensive_impact += impact,
            'D' => {
                offensive_impact += impact * 0.3;
                defensive_impact += impact * 0.7;
            }
            'G' => defensive_impact += impact,
            _ => offensive_impact += impact,
        }

        if matches!(injury.player_tier, PlayerTier::Critical | PlayerTier::High) {
            key_injuries.push(injury.player_name.clone());
        }
    }

    InjuryImpact {
        team: injuries.first().map(|i| i.team.clone()).unwrap_or_default(),
        offensive_impact,
        defensive_impact,
        net_impact: -(offensive_impact + defensive_impact),
        key_injuries,
    }
}
