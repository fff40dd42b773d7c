//! Core library for a personal forex trading journal. Strategies group
//! monthly trade logs; a hosted relational backend persists them; pure
//! aggregation turns the logged trades into win rates, profit totals and
//! equity curves for the dashboard.

pub mod analytics;
pub mod api;
pub mod config;
pub mod journal;
pub mod models;

pub use analytics::{curve_trend, equity_curve, EquityPoint, EquityTrend, TradeSummary};
pub use api::{AdminApi, MemoryStore, StoreError, SupabaseStore, TableStore};
pub use config::{ConfigError, StoreConfig};
pub use journal::{AppState, Journal, JournalError, SnapshotError};
pub use models::{Direction, Month, NewTrade, Strategy, Trade, TradeEdit, TradeResult};
