use serde::{Deserialize, Serialize};

use super::trade::Trade;

/// Calendar container for the trades logged under one strategy month.
/// Trades stay in fetch order (date ascending); the equity curve and all
/// aggregates read them in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Month {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub trades: Vec<Trade>,
    pub notes: Option<String>,
}

impl Month {
    pub fn trade(&self, trade_id: &str) -> Option<&Trade> {
        self.trades.iter().find(|t| t.id == trade_id)
    }
}
