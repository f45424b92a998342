//! Model evaluation metrics: accuracy, MAE/RMSE, calibration.

use std::fmt::Write as FmtWrite;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RinksideError;

/// Single prediction with its realized outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub game_id: String,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub predicted_home_goals: f64,
    pub predicted_away_goals: f64,
    pub actual_home_goals: u32,
    pub actual_away_goals: u32,
    pub predicted_home_win_prob: f64,
    pub home_won: bool,
}

impl PredictionResult {
    pub fn predicted_total(&self) -> f64 {
        self.predicted_home_goals + self.predicted_away_goals
    }

    pub fn actual_total(&self) -> u32 {
        self.actual_home_goals + self.actual_away_goals
    }

    fn error_for(&self, target: Target) -> f64 {
        match target {
            Target::Total => self.predicted_total() - self.actual_total() as f64,
            Target::HomeGoals => self.predicted_home_goals - self.actual_home_goals as f64,
            Target::AwayGoals => self.predicted_away_goals - self.actual_away_goals as f64,
        }
    }
}

/// Which goal prediction a metric scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Total,
    HomeGoals,
    AwayGoals,
}

impl FromStr for Target {
    type Err = RinksideError;

    /// Unrecognized targets are a programming error, not a data problem.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(Target::Total),
            "home_goals" => Ok(Target::HomeGoals),
            "away_goals" => Ok(Target::AwayGoals),
            other => Err(RinksideError::UnknownTarget(other.to_string())),
        }
    }
}

/// Mean absolute error of goal predictions.
///
/// Under 1.0 is excellent for NHL totals; above 2.0 is poor.
pub fn calculate_mae(predictions: &[PredictionResult], target: Target) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    predictions.iter().map(|p| p.error_for(target).abs()).sum::<f64>() / predictions.len() as f64
}

/// Root mean square error; penalizes large misses more than MAE.
pub fn calculate_rmse(predictions: &[PredictionResult], target: Target) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let mean_sq = predictions.iter().map(|p| p.error_for(target).powi(2)).sum::<f64>()
        / predictions.len() as f64;
    mean_sq.sqrt()
}

/// Fraction of games where the model picked the winner.
pub fn calculate_accuracy(predictions: &[PredictionResult]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions
        .iter()
        .filter(|p| (p.predicted_home_win_prob > 0.5) == p.home_won)
        .count();
    correct as f64 / predictions.len() as f64
}

/// One calibration bucket: predictions near `center` won `actual_rate` of
/// the time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CalibrationBucket {
    pub center: f64,
    pub actual_rate: f64,
    pub count: usize,
}

/// Partition predictions into equal-width probability buckets and compare
/// predicted probability to the observed win rate. Empty buckets are
/// omitted. A well-calibrated model has `center` ≈ `actual_rate`.
pub fn calibration_buckets(
    predictions: &[PredictionResult],
    n_buckets: usize,
) -> Vec<CalibrationBucket> {
    if n_buckets == 0 {
        return Vec::new();
    }
    let bucket_size = 1.0 / n_buckets as f64;
    let mut wins = vec![0usize; n_buckets];
    let mut counts = vec![0usize; n_buckets];

    for pred in predictions {
        let idx = ((pred.predicted_home_win_prob / bucket_size) as usize).min(n_buckets - 1);
        counts[idx] += 1;
        if pred.home_won {
            wins[idx] += 1;
        }
    }

    (0..n_buckets)
        .filter(|&i| counts[i] > 0)
        .map(|i| CalibrationBucket {
            center: (i as f64 + 0.5) * bucket_size,
            actual_rate: wins[i] as f64 / counts[i] as f64,
            count: counts[i],
        })
        .collect()
}

/// Expected Calibration Error over ten buckets.
///
/// Count-weighted average gap between bucket center and observed win rate;
/// lower is better, under 0.05 is well calibrated.
pub fn calibration_error(predictions: &[PredictionResult]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let total = predictions.len() as f64;
    calibration_buckets(predictions, 10)
        .iter()
        .map(|b| (b.count as f64 / total) * (b.center - b.actual_rate).abs())
        .sum()
}

/// Comprehensive model performance metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub n_predictions: usize,
    pub accuracy: f64,
    pub mae_total: f64,
    pub mae_home: f64,
    pub mae_away: f64,
    pub rmse_total: f64,
    pub calibration_error: f64,
}

impl ModelPerformance {
    /// All metrics from one prediction set.
    pub fn from_predictions(predictions: &[PredictionResult]) -> Self {
        Self {
            n_predictions: predictions.len(),
            accuracy: calculate_accuracy(predictions),
            mae_total: calculate_mae(predictions, Target::Total),
            mae_home: calculate_mae(predictions, Target::HomeGoals),
            mae_away: calculate_mae(predictions, Target::AwayGoals),
            rmse_total: calculate_rmse(predictions, Target::Total),
            calibration_error: calibration_error(predictions),
        }
    }

    /// Formatted multi-line summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Model Performance ({} predictions)", self.n_predictions);
        let _ = writeln!(out, "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}");
        let _ = writeln!(out, "Accuracy:        {:.1}%", self.accuracy * 100.0);
        let _ = writeln!(out, "MAE (Total):     {:.2} goals", self.mae_total);
        let _ = writeln!(out, "MAE (Home):      {:.2} goals", self.mae_home);
        let _ = writeln!(out, "MAE (Away):      {:.2} goals", self.mae_away);
        let _ = writeln!(out, "RMSE (Total):    {:.2} goals", self.rmse_total);
        let _ = writeln!(out, "Calibration:     {:.3}", self.calibration_error);
        out
    }
}
