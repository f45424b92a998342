pub mod backtest;
pub mod config;
pub mod domain;
pub mod error;
pub mod market;
pub mod model;

pub use backtest::{
    BacktestConfig, BacktestEngine, BacktestResults, BetResult, BetType, SyntheticOddsModel,
};
pub use config::AppConfig;
pub use domain::{GameOdds, GameRecord, GameState, OddsSnapshot, TeamMetrics};
pub use error::{Result, RinksideError};
pub use market::{
    american_to_decimal, american_to_implied, calculate_edge, calculate_ev, decimal_to_american,
    implied_to_american, BetRating, EdgeResult,
};
pub use model::{
    calculate_expected_goals, calculate_win_probability, expected_goals, poisson_prob,
    predict_puck_line, predict_total, win_probability, GameProbabilities, ModelPerformance,
    PredictionResult, PuckLinePrediction, Target, TotalsPrediction,
};
