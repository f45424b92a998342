pub mod adjustments;
pub mod evaluation;
pub mod expected_goals;
pub mod poisson;
pub mod puck_line;
pub mod totals;

pub use adjustments::{Confidence, GoalieAdjustment, InjuryImpact, InjuryReport};
pub use evaluation::{ModelPerformance, PredictionResult, Target};
pub use expected_goals::{calculate_expected_goals, expected_goals, XgAdjustments};
pub use poisson::{calculate_win_probability, poisson_prob, win_probability, GameProbabilities};
pub use puck_line::{predict_puck_line, PuckLinePrediction};
pub use totals::{predict_total, TotalsPrediction};
