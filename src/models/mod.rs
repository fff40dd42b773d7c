pub mod month;
pub mod strategy;
pub mod trade;

pub use month::Month;
pub use strategy::Strategy;
pub use trade::{Direction, NewTrade, Trade, TradeEdit, TradeResult};
