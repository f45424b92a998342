use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub backtest: BacktestDefaults,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Goal boost for the home offense (e.g., 0.15 = 15%)
    #[serde(default = "default_home_advantage")]
    pub home_advantage: f64,
    /// Home share of OT/SO wins
    #[serde(default = "default_home_ot_advantage")]
    pub home_ot_advantage: f64,
    /// Per-team goal ceiling in the Poisson enumeration
    #[serde(default = "default_max_goals")]
    pub max_goals: u32,
    /// Book preferred when several quote the same game
    #[serde(default = "default_provider")]
    pub preferred_provider: String,
}

fn default_home_advantage() -> f64 {
    0.15
}

fn default_home_ot_advantage() -> f64 {
    0.52
}

fn default_max_goals() -> u32 {
    10
}

fn default_provider() -> String {
    "DraftKings".to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            home_advantage: default_home_advantage(),
            home_ot_advantage: default_home_ot_advantage(),
            max_goals: default_max_goals(),
            preferred_provider: default_provider(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BacktestDefaults {
    #[serde(default = "default_bankroll")]
    pub initial_bankroll: Decimal,
    #[serde(default = "default_unit_size")]
    pub unit_size: Decimal,
    /// Minimum edge (fraction) required to place a bet
    #[serde(default = "default_min_edge")]
    pub min_edge: f64,
    /// Ceiling on the Kelly fraction
    #[serde(default = "default_max_kelly")]
    pub max_kelly_fraction: f64,
}

fn default_bankroll() -> Decimal {
    Decimal::from(1000)
}

fn default_unit_size() -> Decimal {
    Decimal::from(10)
}

fn default_min_edge() -> f64 {
    0.02
}

fn default_max_kelly() -> f64 {
    0.25
}

impl Default for BacktestDefaults {
    fn default() -> Self {
        Self {
            initial_bankroll: default_bankroll(),
            unit_size: default_unit_size(),
            min_edge: default_min_edge(),
            max_kelly_fraction: default_max_kelly(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("RINKSIDE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (RINKSIDE_MODEL__HOME_ADVANTAGE, etc.)
            .add_source(
                Environment::with_prefix("RINKSIDE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(0.0..1.0).contains(&self.model.home_advantage) {
            errors.push("model.home_advantage must be in [0, 1)".to_string());
        }

        if !(0.0..=1.0).contains(&self.model.home_ot_advantage) {
            errors.push("model.home_ot_advantage must be in [0, 1]".to_string());
        }

        if self.model.max_goals == 0 {
            errors.push("model.max_goals must be positive".to_string());
        }

        if self.backtest.initial_bankroll <= Decimal::ZERO {
            errors.push("backtest.initial_bankroll must be positive".to_string());
        }

        if self.backtest.unit_size <= Decimal::ZERO {
            errors.push("backtest.unit_size must be positive".to_string());
        }

        if self.backtest.min_edge < 0.0 {
            errors.push("backtest.min_edge must be non-negative".to_string());
        }

        if !(0.0..=1.0).contains(&self.backtest.max_kelly_fraction)
            || self.backtest.max_kelly_fraction == 0.0
        {
            errors.push("backtest.max_kelly_fraction must be in (0, 1]".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            backtest: BacktestDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model.home_advantage, 0.15);
        assert_eq!(config.backtest.unit_size, dec!(10));
        assert_eq!(config.model.preferred_provider, "DraftKings");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.model.home_advantage = 1.5;
        config.backtest.unit_size = Decimal::ZERO;
        config.backtest.max_kelly_fraction = 0.0;

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_missing_config_dir_falls_back_to_defaults() {
        let config = AppConfig::load_from("/nonexistent/config/dir").expect("defaults should load");
        assert_eq!(config.model.max_goals, 10);
        assert_eq!(config.backtest.min_edge, 0.02);
    }
}
