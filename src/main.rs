use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tabled::{Table, Tabled};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rinkside::backtest::{filter_completed, load_games_from_json, SyntheticOddsModel};
use rinkside::config::AppConfig;
use rinkside::error::{Result, RinksideError};
use rinkside::market::calculate_edge;
use rinkside::model::evaluation::{calculate_mae, calculate_rmse};
use rinkside::model::expected_goals::calculate_expected_goals;
use rinkside::model::poisson::calculate_win_probability;
use rinkside::model::{predict_puck_line, predict_total, ModelPerformance, PredictionResult, Target};
use rinkside::{BacktestConfig, BacktestEngine, BetType, TeamMetrics};

#[derive(Parser)]
#[command(name = "rinkside", about = "NHL prediction and betting-value backtest engine")]
struct Cli {
    /// Configuration directory
    #[arg(long, default_value = "config", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over historical games with a simulated market
    Backtest {
        /// JSON file of historical game records
        #[arg(long)]
        games: PathBuf,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Initial bankroll in dollars
        #[arg(long)]
        bankroll: Option<Decimal>,
        /// Unit size in dollars
        #[arg(long)]
        unit_size: Option<Decimal>,
        /// Minimum edge required (fraction, e.g. 0.02)
        #[arg(long)]
        min_edge: Option<f64>,
        /// Kelly fraction ceiling
        #[arg(long)]
        max_kelly: Option<f64>,
        /// RNG seed for the synthetic market
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Number of recent bets to display
        #[arg(long, default_value_t = 20)]
        recent: usize,
    },
    /// Predict one matchup from team stats
    Predict {
        /// JSON file of per-team metrics
        #[arg(long)]
        stats: PathBuf,
        /// Home team abbreviation
        #[arg(long)]
        home: String,
        /// Away team abbreviation
        #[arg(long)]
        away: String,
        /// Totals line to price
        #[arg(long, default_value_t = 6.0)]
        total_line: f64,
        /// Moneyline odds for the home side, for edge analysis
        #[arg(long)]
        home_odds: Option<i32>,
    },
    /// Score saved predictions against actual results
    Evaluate {
        /// JSON file of prediction results
        #[arg(long)]
        predictions: PathBuf,
        /// Restrict MAE/RMSE to one target: total, home_goals, away_goals
        #[arg(long)]
        target: Option<String>,
    },
}

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Type")]
    bet_type: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Profit")]
    profit: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config_dir)?;
    init_logging(&config.logging.level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            warn!("config: {}", error);
        }
        return Err(RinksideError::InvalidConfig(errors.join("; ")));
    }

    match cli.command {
        Commands::Backtest {
            games,
            start,
            end,
            bankroll,
            unit_size,
            min_edge,
            max_kelly,
            seed,
            recent,
        } => {
            let defaults = BacktestConfig::default();
            let run_config = BacktestConfig {
                start_date: start.unwrap_or(defaults.start_date),
                end_date: end.unwrap_or(defaults.end_date),
                initial_bankroll: bankroll.unwrap_or(config.backtest.initial_bankroll),
                unit_size: unit_size.unwrap_or(config.backtest.unit_size),
                min_edge: min_edge.unwrap_or(config.backtest.min_edge),
                max_kelly_fraction: max_kelly.unwrap_or(config.backtest.max_kelly_fraction),
                bet_types: vec![BetType::Moneyline],
            };
            run_config
                .validate()
                .map_err(|e| RinksideError::InvalidConfig(e.join("; ")))?;

            run_backtest(&games, run_config, seed, recent)
        }
        Commands::Predict {
            stats,
            home,
            away,
            total_line,
            home_odds,
        } => run_predict(&config, &stats, &home, &away, total_line, home_odds),
        Commands::Evaluate {
            predictions,
            target,
        } => run_evaluate(&predictions, target.as_deref()),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("info,rinkside={}", level)));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_backtest(
    games_path: &PathBuf,
    config: BacktestConfig,
    seed: u64,
    recent: usize,
) -> Result<()> {
    let all_games = load_games_from_json(games_path)?;
    let games = filter_completed(&all_games, config.start_date, config.end_date);

    if games.is_empty() {
        warn!(
            "No completed games between {} and {}",
            config.start_date, config.end_date
        );
        return Ok(());
    }

    info!("Running backtest on {} historical games", games.len());

    let mut market = SyntheticOddsModel::new(seed);
    let mut engine = BacktestEngine::new(config);

    for game in &games {
        let sim = market.simulate();
        engine.evaluate_bet(
            &game.game_id,
            game.date,
            BetType::Moneyline,
            sim.model_prob,
            sim.odds,
            game.home_won,
        );
    }

    let results = engine.into_results();
    println!("{}", results.summary());

    if recent > 0 && !results.bets.is_empty() {
        let rows: Vec<BetRow> = results
            .bets
            .iter()
            .rev()
            .take(recent)
            .rev()
            .map(|b| BetRow {
                date: b.date.to_string(),
                game: b.game_id.clone(),
                bet_type: b.bet_type.to_string(),
                odds: format!("{:+}", b.odds),
                stake: format!("${:.2}", b.stake),
                edge: format!("{:.1}%", b.edge * 100.0),
                result: match b.won {
                    Some(true) => "win".to_string(),
                    Some(false) => "loss".to_string(),
                    None => "pending".to_string(),
                },
                profit: b
                    .profit
                    .map(|p| format!("${:+.2}", p))
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        println!("Recent bets:");
        println!("{}", Table::new(rows));
    }

    Ok(())
}

fn run_predict(
    config: &AppConfig,
    stats_path: &PathBuf,
    home: &str,
    away: &str,
    total_line: f64,
    home_odds: Option<i32>,
) -> Result<()> {
    for abbrev in [home, away] {
        if rinkside::domain::team::team_by_abbrev(abbrev).is_none() {
            return Err(RinksideError::UnknownTeam(abbrev.to_string()));
        }
    }

    let file = std::fs::File::open(stats_path)?;
    let teams: Vec<TeamMetrics> = serde_json::from_reader(std::io::BufReader::new(file))?;

    let find = |abbrev: &str| -> Result<&TeamMetrics> {
        teams
            .iter()
            .find(|t| t.team.eq_ignore_ascii_case(abbrev))
            .ok_or_else(|| RinksideError::StatsUnavailable(abbrev.to_string()))
    };
    let home_metrics = find(home)?;
    let away_metrics = find(away)?;

    let (home_xg, away_xg) = calculate_expected_goals(
        home_metrics,
        away_metrics,
        config.model.home_advantage,
        None,
    );
    let probs = calculate_win_probability(
        home_xg,
        away_xg,
        config.model.home_ot_advantage,
        config.model.max_goals,
    );
    let totals = predict_total(home_xg, away_xg, total_line);
    let puck_line = predict_puck_line(home_xg, away_xg, None, config.model.max_goals);

    println!("{} @ {}", away.to_uppercase(), home.to_uppercase());
    println!("Expected goals:   {:.2} - {:.2}", home_xg, away_xg);
    println!(
        "Win probability:  {:.1}% / {:.1}% (OT {:.1}%)",
        probs.home_win * 100.0,
        probs.away_win * 100.0,
        probs.overtime * 100.0
    );
    println!(
        "Total {:.1}:        over {:.1}% / under {:.1}% / push {:.1}%",
        total_line,
        totals.over_prob * 100.0,
        totals.under_prob * 100.0,
        totals.push_prob * 100.0
    );
    println!(
        "Puck line -1.5:   {:.1}% (away +1.5 {:.1}%), confidence {}",
        puck_line.home_minus_1_5 * 100.0,
        puck_line.away_plus_1_5 * 100.0,
        puck_line.confidence
    );

    if let Some(odds) = home_odds {
        let edge = calculate_edge(probs.home_win, odds);
        println!(
            "Home ML {:+}:     edge {:+.1}%, kelly {:.1}%, {}",
            odds,
            edge.edge_pct,
            edge.kelly_fraction * 100.0,
            edge.bet_rating
        );
    }

    Ok(())
}

fn run_evaluate(predictions_path: &PathBuf, target: Option<&str>) -> Result<()> {
    let file = std::fs::File::open(predictions_path)?;
    let predictions: Vec<PredictionResult> =
        serde_json::from_reader(std::io::BufReader::new(file))?;

    let performance = ModelPerformance::from_predictions(&predictions);
    println!("{}", performance.summary());

    if let Some(raw) = target {
        let target: Target = raw.parse()?;
        println!(
            "MAE ({raw}):  {:.3}",
            calculate_mae(&predictions, target)
        );
        println!(
            "RMSE ({raw}): {:.3}",
            calculate_rmse(&predictions, target)
        );
    }

    Ok(())
}
