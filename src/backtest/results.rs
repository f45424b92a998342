//! Bet log and aggregate backtest statistics.
//!
//! The ordered bet list is the single source of truth: every aggregate is
//! derived from it on demand, so the raw log and the reported statistics
//! cannot drift apart. Drawdown and streak metrics are path-dependent —
//! callers must append bets in chronological order.

use std::fmt::Write as FmtWrite;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wager market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetType {
    Moneyline,
    PuckLine,
    Totals,
}

impl std::fmt::Display for BetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BetType::Moneyline => write!(f, "moneyline"),
            BetType::PuckLine => write!(f, "puck_line"),
            BetType::Totals => write!(f, "totals"),
        }
    }
}

/// One evaluated wager.
///
/// `won`/`profit` stay `None` until the outcome is known; a synchronous
/// backtest settles them immediately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetResult {
    pub game_id: String,
    pub date: NaiveDate,
    pub bet_type: BetType,
    pub odds: i32,
    pub stake: Decimal,
    pub model_prob: f64,
    /// Edge over the market at bet time (fraction, not percent).
    pub edge: f64,
    pub won: Option<bool>,
    pub profit: Option<Decimal>,
}

/// Aggregated backtest results, derived from the owned bet list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResults {
    pub unit_size: Decimal,
    pub bets: Vec<BetResult>,
}

impl BacktestResults {
    pub fn new(unit_size: Decimal) -> Self {
        Self {
            unit_size,
            bets: Vec::new(),
        }
    }

    pub fn push(&mut self, bet: BetResult) {
        self.bets.push(bet);
    }

    fn settled(&self) -> impl Iterator<Item = &BetResult> {
        self.bets.iter().filter(|b| b.won.is_some())
    }

    /// Number of settled bets (pending wagers are excluded).
    pub fn total_bets(&self) -> usize {
        self.settled().count()
    }

    pub fn wins(&self) -> usize {
        self.settled().filter(|b| b.won == Some(true)).count()
    }

    pub fn losses(&self) -> usize {
        self.settled().filter(|b| b.won == Some(false)).count()
    }

    pub fn total_staked(&self) -> Decimal {
        self.settled().map(|b| b.stake).sum()
    }

    pub fn total_profit(&self) -> Decimal {
        self.settled().filter_map(|b| b.profit).sum()
    }

    pub fn win_rate(&self) -> f64 {
        let total = self.total_bets();
        if total == 0 {
            return 0.0;
        }
        self.wins() as f64 / total as f64
    }

    /// Return on investment as a percentage of total staked.
    pub fn roi(&self) -> f64 {
        let staked = self.total_staked();
        if staked.is_zero() {
            return 0.0;
        }
        (self.total_profit() / staked * Decimal::from(100))
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Profit measured in betting units.
    pub fn units_profit(&self) -> f64 {
        if self.unit_size.is_zero() {
            return 0.0;
        }
        (self.total_profit() / self.unit_size).to_f64().unwrap_or(0.0)
    }

    /// Worst peak-to-trough decline of cumulative profit, in dollars.
    ///
    /// Single pass over the bet list in its original order.
    pub fn max_drawdown(&self) -> Decimal {
        let mut cumulative = Decimal::ZERO;
        let mut peak = Decimal::ZERO;
        let mut max_dd = Decimal::ZERO;

        for bet in &self.bets {
            if let Some(profit) = bet.profit {
                cumulative += profit;
                if cumulative > peak {
                    peak = cumulative;
                }
                let dd = peak - cumulative;
                if dd > max_dd {
                    max_dd = dd;
                }
            }
        }
        max_dd
    }

    /// Longest run of consecutive losses in list order.
    ///
    /// Pending bets (`won == None`) neither extend nor reset a streak.
    pub fn longest_losing_streak(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;

        for bet in &self.bets {
            match bet.won {
                Some(false) => {
                    current += 1;
                    if current > longest {
                        longest = current;
                    }
                }
                Some(true) => current = 0,
                None => {}
            }
        }
        longest
    }

    /// Fixed-format text report.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Backtest Results ({} bets)", self.total_bets());
        let _ = writeln!(out, "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}");
        let _ = writeln!(
            out,
            "Record:          {}-{} ({:.1}%)",
            self.wins(),
            self.losses(),
            self.win_rate() * 100.0
        );
        let _ = writeln!(out, "Total Staked:    ${:.2}", self.total_staked());
        let _ = writeln!(out, "Total Profit:    ${:+.2}", self.total_profit());
        let _ = writeln!(out, "ROI:             {:+.1}%", self.roi());
        let _ = writeln!(out, "Units:           {:+.1}u", self.units_profit());
        let _ = writeln!(out, "Max Drawdown:    ${:.2}", self.max_drawdown());
        let _ = writeln!(out, "Longest Losing:  {} bets", self.longest_losing_streak());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bet(won: Option<bool>, profit: Option<Decimal>, stake: Decimal) -> BetResult {
        BetResult {
            game_id: "g".into(),
            date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            bet_type: BetType::Moneyline,
            odds: -110,
            stake,
            model_prob: 0.6,
            edge: 0.05,
            won,
            profit,
        }
    }

    #[test]
    fn test_empty_results() {
        let results = BacktestResults::new(dec!(10));
        assert_eq!(results.total_bets(), 0);
        assert_eq!(results.win_rate(), 0.0);
        assert_eq!(results.roi(), 0.0);
        assert_eq!(results.units_profit(), 0.0);
        assert_eq!(results.max_drawdown(), Decimal::ZERO);
        assert_eq!(results.longest_losing_streak(), 0);
    }

    #[test]
    fn test_derived_metrics() {
        let mut results = BacktestResults::new(dec!(10));
        results.push(bet(Some(true), Some(dec!(9.09)), dec!(10)));
        results.push(bet(Some(false), Some(dec!(-10)), dec!(10)));
        results.push(bet(Some(true), Some(dec!(15)), dec!(10)));

        assert_eq!(results.total_bets(), 3);
        assert_eq!(results.wins(), 2);
        assert_eq!(results.losses(), 1);
        assert_eq!(results.total_staked(), dec!(30));
        assert_eq!(results.total_profit(), dec!(14.09));
        assert!((results.win_rate() - 2.0 / 3.0).abs() < 1e-9);
        // 14.09 / 30 * 100
        assert!((results.roi() - 46.9666).abs() < 0.01);
        assert!((results.units_profit() - 1.409).abs() < 1e-9);
    }

    #[test]
    fn test_max_drawdown_is_path_dependent() {
        let mut results = BacktestResults::new(dec!(10));
        // +20, -10, -15, +5: peak 20, trough -5 -> drawdown 25
        for profit in [dec!(20), dec!(-10), dec!(-15), dec!(5)] {
            results.push(bet(Some(profit > Decimal::ZERO), Some(profit), dec!(10)));
        }
        assert_eq!(results.max_drawdown(), dec!(25));

        // Same bets, different order: -10, -15, +5, +20 -> drawdown 25 from 0
        let mut reordered = BacktestResults::new(dec!(10));
        for profit in [dec!(-10), dec!(-15), dec!(5), dec!(20)] {
            reordered.push(bet(Some(profit > Decimal::ZERO), Some(profit), dec!(10)));
        }
        assert_eq!(reordered.max_drawdown(), dec!(25));

        // And a winning-first path has no drawdown at all
        let mut winning = BacktestResults::new(dec!(10));
        for profit in [dec!(5), dec!(20), dec!(10)] {
            winning.push(bet(Some(true), Some(profit), dec!(10)));
        }
        assert_eq!(winning.max_drawdown(), Decimal::ZERO);
    }

    #[test]
    fn test_longest_losing_streak() {
        let mut results = BacktestResults::new(dec!(10));
        let outcomes = [
            Some(false),
            Some(false),
            Some(true),
            Some(false),
            Some(false),
            Some(false),
            Some(true),
        ];
        for won in outcomes {
            let profit = won.map(|w| if w { dec!(9) } else { dec!(-10) });
            results.push(bet(won, profit, dec!(10)));
        }
        assert_eq!(results.longest_losing_streak(), 3);
    }

    #[test]
    fn test_pending_bets_do_not_interrupt_streaks() {
        // A pending bet in the middle of a losing run must not reset it
        let mut results = BacktestResults::new(dec!(10));
        let outcomes = [Some(false), Some(false), None, Some(false), Some(true)];
        for won in outcomes {
            let profit = won.map(|w| if w { dec!(9) } else { dec!(-10) });
            results.push(bet(won, profit, dec!(10)));
        }
        assert_eq!(results.longest_losing_streak(), 3);

        // Pending bets are also excluded from settled counts and money totals
        assert_eq!(results.total_bets(), 4);
        assert_eq!(results.total_staked(), dec!(40));
    }

    #[test]
    fn test_summary_format() {
        let mut results = BacktestResults::new(dec!(10));
        results.push(bet(Some(true), Some(dec!(9.09)), dec!(10)));
        results.push(bet(Some(false), Some(dec!(-10)), dec!(10)));

        let report = results.summary();
        assert!(report.contains("Backtest Results (2 bets)"));
        assert!(report.contains("Record:          1-1 (50.0%)"));
        assert!(report.contains("Total Staked:    $20.00"));
        assert!(report.contains("Longest Losing:  1 bets"));
    }

    #[test]
    fn test_bet_type_labels() {
        assert_eq!(BetType::Moneyline.to_string(), "moneyline");
        assert_eq!(BetType::PuckLine.to_string(), "puck_line");
        assert_eq!(BetType::Totals.to_string(), "totals");
        let json = serde_json::to_string(&BetType::PuckLine).unwrap();
        assert_eq!(json, "\"puck_line\"");
    }
}
