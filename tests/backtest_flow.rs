//! End-to-end backtest flow: historical games through the engine to the
//! summary report.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use rinkside::backtest::{filter_completed, SyntheticOddsModel};
use rinkside::domain::{GameRecord, GameState};
use rinkside::{BacktestConfig, BacktestEngine, BetType};

fn game(id: u32, day: u32, home_won: bool) -> GameRecord {
    GameRecord {
        game_id: format!("20250200{:02}", id),
        date: NaiveDate::from_ymd_opt(2025, 11, day).unwrap(),
        home_team: "TOR".into(),
        away_team: "MTL".into(),
        home_score: if home_won { 4 } else { 2 },
        away_score: if home_won { 2 } else { 4 },
        home_won,
        game_state: GameState::Off,
    }
}

#[test]
fn single_game_moneyline_bet() {
    let config = BacktestConfig {
        start_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        min_edge: 0.02,
        ..BacktestConfig::default()
    };
    let mut engine = BacktestEngine::new(config);

    let g = game(1, 5, true);
    let bet = engine
        .evaluate_bet(&g.game_id, g.date, BetType::Moneyline, 0.6, -110, g.home_won)
        .expect("0.6 against -110 clears a 2% edge floor");

    let results = engine.into_results();
    assert_eq!(results.total_bets(), 1);

    assert_eq!(bet.won, Some(true));
    let expected_profit = bet.stake * dec!(100) / dec!(110);
    assert_eq!(bet.profit, Some(expected_profit));
    assert_eq!(results.total_profit(), expected_profit);
}

#[test]
fn full_simulated_season() {
    let games: Vec<GameRecord> = (0..60)
        .map(|i| game(i, 1 + (i % 28), i % 5 != 0))
        .collect();

    let config = BacktestConfig {
        start_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
        ..BacktestConfig::default()
    };
    let completed = filter_completed(&games, config.start_date, config.end_date);
    assert_eq!(completed.len(), 60);

    let mut market = SyntheticOddsModel::new(1234);
    let mut engine = BacktestEngine::new(config.clone());

    for g in &completed {
        let sim = market.simulate();
        engine.evaluate_bet(
            &g.game_id,
            g.date,
            BetType::Moneyline,
            sim.model_prob,
            sim.odds,
            g.home_won,
        );
    }

    let results = engine.into_results();

    // Every recorded bet cleared the edge floor and settled
    assert_eq!(results.total_bets(), results.bets.len());
    for bet in &results.bets {
        assert!(bet.edge >= config.min_edge, "bet edge {} below floor", bet.edge);
        assert!(bet.stake >= config.unit_size, "stake {} below one unit", bet.stake);
        assert!(bet.won.is_some() && bet.profit.is_some());
    }

    // Aggregates reconcile with the raw log
    assert_eq!(results.wins() + results.losses(), results.total_bets());
    let manual_profit: rust_decimal::Decimal =
        results.bets.iter().filter_map(|b| b.profit).sum();
    assert_eq!(results.total_profit(), manual_profit);

    // The report renders every headline metric
    let report = results.summary();
    for needle in ["Record:", "Total Staked:", "ROI:", "Units:", "Max Drawdown:", "Longest Losing:"] {
        assert!(report.contains(needle), "summary missing {:?}", needle);
    }
}

#[test]
fn identical_seeds_reproduce_results() {
    let games: Vec<GameRecord> = (0..25).map(|i| game(i, 1 + (i % 28), i % 3 == 0)).collect();

    let run = |seed: u64| {
        let mut market = SyntheticOddsModel::new(seed);
        let mut engine = BacktestEngine::new(BacktestConfig {
            start_date: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 11, 30).unwrap(),
            ..BacktestConfig::default()
        });
        for g in &games {
            let sim = market.simulate();
            engine.evaluate_bet(
                &g.game_id,
                g.date,
                BetType::Moneyline,
                sim.model_prob,
                sim.odds,
                g.home_won,
            );
        }
        engine.into_results()
    };

    let a = run(99);
    let b = run(99);
    assert_eq!(a.total_bets(), b.total_bets());
    assert_eq!(a.total_profit(), b.total_profit());
    assert_eq!(a.max_drawdown(), b.max_drawdown());
    assert_eq!(a.summary(), b.summary());
}
