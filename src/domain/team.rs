//! Team identity and per-season rate statistics.
//!
//! `TeamMetrics` is the immutable snapshot every prediction consumes. Raw
//! API responses are converted into it at the boundary so the model core
//! never sees loosely-typed maps.

use serde::{Deserialize, Serialize};

/// Static NHL team table: (API team id, abbreviation, full name).
/// Read-only lookup shared with the client layer.
pub const NHL_TEAMS: &[(u32, &str, &str)] = &[
    (1, "NJD", "New Jersey Devils"),
    (2, "NYI", "New York Islanders"),
    (3, "NYR", "New York Rangers"),
    (4, "PHI", "Philadelphia Flyers"),
    (5, "PIT", "Pittsburgh Penguins"),
    (6, "BOS", "Boston Bruins"),
    (7, "BUF", "Buffalo Sabres"),
    (8, "MTL", "Montreal Canadiens"),
    (9, "OTT", "Ottawa Senators"),
    (10, "TOR", "Toronto Maple Leafs"),
    (12, "CAR", "Carolina Hurricanes"),
    (13, "FLA", "Florida Panthers"),
    (14, "TBL", "Tampa Bay Lightning"),
    (15, "WSH", "Washington Capitals"),
    (16, "CHI", "Chicago Blackhawks"),
    (17, "DET", "Detroit Red Wings"),
    (18, "NSH", "Nashville Predators"),
    (19, "STL", "St. Louis Blues"),
    (20, "CGY", "Calgary Flames"),
    (21, "COL", "Colorado Avalanche"),
    (22, "EDM", "Edmonton Oilers"),
    (23, "VAN", "Vancouver Canucks"),
    (24, "ANA", "Anaheim Ducks"),
    (25, "DAL", "Dallas Stars"),
    (26, "LAK", "Los Angeles Kings"),
    (28, "SJS", "San Jose Sharks"),
    (29, "CBJ", "Columbus Blue Jackets"),
    (30, "MIN", "Minnesota Wild"),
    (52, "WPG", "Winnipeg Jets"),
    (53, "ARI", "Arizona Coyotes"),
    (54, "VGK", "Vegas Golden Knights"),
    (55, "SEA", "Seattle Kraken"),
];

/// Look up a team by its three-letter abbreviation.
pub fn team_by_abbrev(abbrev: &str) -> Option<(u32, &'static str, &'static str)> {
    NHL_TEAMS
        .iter()
        .find(|(_, a, _)| a.eq_ignore_ascii_case(abbrev))
        .copied()
}

/// Look up a team by its API id.
pub fn team_by_id(id: u32) -> Option<(u32, &'static str, &'static str)> {
    NHL_TEAMS.iter().find(|(i, _, _)| *i == id).copied()
}

/// Core team statistics for predictions.
///
/// All fields are per-game season rates; `pp_pct`/`pk_pct` are percentages
/// (e.g. 22.5 for 22.5%).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMetrics {
    pub team: String,
    pub goals_for_pg: f64,
    pub goals_against_pg: f64,
    pub shots_for_pg: f64,
    pub shots_against_pg: f64,
    pub pp_pct: f64,
    pub pk_pct: f64,
}

impl TeamMetrics {
    /// Goals for minus goals against per game.
    pub fn goal_differential(&self) -> f64 {
        self.goals_for_pg - self.goals_against_pg
    }

    /// Team shooting percentage.
    pub fn shooting_pct(&self) -> f64 {
        if self.shots_for_pg == 0.0 {
            return 0.0;
        }
        (self.goals_for_pg / self.shots_for_pg) * 100.0
    }

    /// Implied save percentage against.
    pub fn save_pct(&self) -> f64 {
        if self.shots_against_pg == 0.0 {
            return 0.0;
        }
        let goals_allowed_rate = self.goals_against_pg / self.shots_against_pg;
        (1.0 - goals_allowed_rate) * 100.0
    }
}
