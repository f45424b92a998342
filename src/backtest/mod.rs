//! Backtest framework: historical data loading, the bet-evaluation engine,
//! and derived performance statistics.

pub mod data;
pub mod engine;
pub mod results;

pub use data::{filter_completed, load_games_from_csv, load_games_from_json, SyntheticOddsModel};
pub use engine::{BacktestConfig, BacktestEngine};
pub use results::{BacktestResults, BetResult, BetType};
