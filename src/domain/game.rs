//! Historical game records consumed by the backtest engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Schedule state of a game as reported by the NHL API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// Final — the game is complete.
    #[serde(rename = "OFF")]
    Off,
    /// In progress.
    #[serde(rename = "LIVE")]
    Live,
    /// Scheduled, not yet started.
    #[serde(rename = "FUT")]
    Fut,
}

/// One historical game with its final score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub game_id: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub home_won: bool,
    pub game_state: GameState,
}

impl GameRecord {
    /// Whether the game has a final result.
    pub fn is_completed(&self) -> bool {
        self.game_state == GameState::Off
    }

    /// Home margin of victory (negative when the home team lost).
    pub fn home_margin(&self) -> i32 {
        self.home_score as i32 - self.away_score as i32
    }

    /// Combined goals scored.
    pub fn total_goals(&self) -> u32 {
        self.home_score + self.away_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: u32, away: u32, state: GameState) -> GameRecord {
        GameRecord {
            game_id: "2025020001".into(),
            date: NaiveDate::from_ymd_opt(2025, 10, 8).unwrap(),
            home_team: "TOR".into(),
            away_team: "MTL".into(),
            home_score: home,
            away_score: away,
            home_won: home > away,
            game_state: state,
        }
    }

    #[test]
    fn test_completed_filter() {
        assert!(game(4, 2, GameState::Off).is_completed());
        assert!(!game(0, 0, GameState::Fut).is_completed());
        assert!(!game(2, 1, GameState::Live).is_completed());
    }

    #[test]
    fn test_margin_and_total() {
        let g = game(2, 4, GameState::Off);
        assert_eq!(g.home_margin(), -2);
        assert_eq!(g.total_goals(), 6);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let g = game(4, 2, GameState::Off);
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"OFF\""));
        let back: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.game_state, GameState::Off);
        assert_eq!(back.date, g.date);
    }
}
