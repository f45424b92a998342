pub mod game;
pub mod odds;
pub mod team;

pub use game::{GameRecord, GameState};
pub use odds::{GameOdds, MarketLine, OddsSnapshot};
pub use team::TeamMetrics;
