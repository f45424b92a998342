//! Backtest engine: applies the edge/Kelly bet policy to historical games.

use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::results::{BacktestResults, BetResult, BetType};
use crate::market::calculate_edge;

/// User-supplied backtest parameters, immutable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_bankroll: Decimal,
    pub unit_size: Decimal,
    /// Minimum edge (fraction) required to place a bet.
    pub min_edge: f64,
    /// Ceiling applied to the Kelly fraction before sizing.
    pub max_kelly_fraction: f64,
    pub bet_types: Vec<BetType>,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            start_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            initial_bankroll: dec!(1000),
            unit_size: dec!(10),
            min_edge: 0.02,
            max_kelly_fraction: 0.25,
            bet_types: vec![BetType::Moneyline],
        }
    }
}

impl BacktestConfig {
    /// Validate run parameters
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.start_date > self.end_date {
            errors.push("start_date must not be after end_date".to_string());
        }
        if self.initial_bankroll <= Decimal::ZERO {
            errors.push("initial_bankroll must be positive".to_string());
        }
        if self.unit_size <= Decimal::ZERO {
            errors.push("unit_size must be positive".to_string());
        }
        if self.min_edge < 0.0 {
            errors.push("min_edge must be non-negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.max_kelly_fraction) || self.max_kelly_fraction == 0.0 {
            errors.push("max_kelly_fraction must be in (0, 1]".to_string());
        }
        if self.bet_types.is_empty() {
            errors.push("at least one bet type is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Evaluates candidate bets one game at a time and accumulates the bet log.
pub struct BacktestEngine {
    config: BacktestConfig,
    results: BacktestResults,
}

impl BacktestEngine {
    pub fn new(config: BacktestConfig) -> Self {
        let results = BacktestResults::new(config.unit_size);
        Self { config, results }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Evaluate one candidate bet.
    ///
    /// Skips (returning `None`) when the edge is below `min_edge`; otherwise
    /// sizes the stake, settles the wager against the actual result, appends
    /// it to the log, and returns the recorded bet.
    ///
    /// Stake sizing treats the capped Kelly fraction as a
    /// percentage-of-bankroll expressed in unit multiples:
    /// `unit_size * kelly / 0.01`, floored at one unit. The `/ 0.01` scaling
    /// defines the reference ROI and unit numbers and must not be altered.
    pub fn evaluate_bet(
        &mut self,
        game_id: &str,
        date: NaiveDate,
        bet_type: BetType,
        model_prob: f64,
        odds: i32,
        actual_result: bool,
    ) -> Option<BetResult> {
        let edge_result = calculate_edge(model_prob, odds);
        let edge = edge_result.edge_pct / 100.0;

        if edge < self.config.min_edge {
            debug!(game_id, edge, min_edge = self.config.min_edge, "skipping bet below edge floor");
            return None;
        }

        let kelly = edge_result.kelly_fraction.min(self.config.max_kelly_fraction);
        let kelly_dec = Decimal::from_f64(kelly).unwrap_or(Decimal::ZERO);
        let mut stake = self.config.unit_size * kelly_dec / dec!(0.01);
        if stake < self.config.unit_size {
            stake = self.config.unit_size;
        }

        let profit = if actual_result {
            if odds > 0 {
                stake * Decimal::from(odds) / dec!(100)
            } else {
                stake * dec!(100) / Decimal::from(odds.abs())
            }
        } else {
            -stake
        };

        let bet = BetResult {
            game_id: game_id.to_string(),
            date,
            bet_type,
            odds,
            stake,
            model_prob,
            edge,
            won: Some(actual_result),
            profit: Some(profit),
        };

        debug!(
            game_id,
            %bet_type,
            odds,
            stake = %stake,
            edge,
            won = actual_result,
            "bet recorded"
        );

        self.results.push(bet.clone());
        Some(bet)
    }

    pub fn results(&self) -> &BacktestResults {
        &self.results
    }

    pub fn into_results(self) -> BacktestResults {
        self.results
    }
}
