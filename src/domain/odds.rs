//! Market odds snapshots and line movement.
//!
//! Odds arrive from an external provider feed as a list of per-provider
//! quotes; `select_provider` applies the preference policy (named provider
//! first, fallback to the first available).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A priced line for one side of a totals or spread market.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketLine {
    pub line: f64,
    pub odds: i32,
}

/// Point-in-time odds capture for one game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsSnapshot {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub provider: Option<String>,
    pub home_ml: i32,
    pub away_ml: i32,
    /// Usually -1.5
    pub home_puck_line: MarketLine,
    /// Usually +1.5
    pub away_puck_line: MarketLine,
    pub total: f64,
    pub over_odds: i32,
    pub under_odds: i32,
}

/// All odds snapshots captured for a game, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOdds {
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    pub game_time: DateTime<Utc>,
    #[serde(default)]
    pub snapshots: Vec<OddsSnapshot>,
}

impl GameOdds {
    /// First recorded odds.
    pub fn opening_odds(&self) -> Option<&OddsSnapshot> {
        self.snapshots.first()
    }

    /// Most recent odds.
    pub fn current_odds(&self) -> Option<&OddsSnapshot> {
        self.snapshots.last()
    }

    /// Change in home ML from open to current.
    pub fn moneyline_movement(&self) -> Option<i32> {
        match (self.opening_odds(), self.current_odds()) {
            (Some(open), Some(cur)) => Some(cur.home_ml - open.home_ml),
            _ => None,
        }
    }

    /// Change in the total line from open to current.
    pub fn total_movement(&self) -> Option<f64> {
        match (self.opening_odds(), self.current_odds()) {
            (Some(open), Some(cur)) => Some(cur.total - open.total),
            _ => None,
        }
    }
}

/// Pick the snapshot from the preferred provider, falling back to the first
/// available quote when the preferred book is absent.
pub fn select_provider<'a>(
    snapshots: &'a [OddsSnapshot],
    preferred: &str,
) -> Option<&'a OddsSnapshot> {
    snapshots
        .iter()
        .find(|s| s.provider.as_deref() == Some(preferred))
        .or_else(|| snapshots.first())
}
