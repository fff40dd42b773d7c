use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::month::Month;
use super::trade::Trade;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub months: Vec<Month>,
    pub notes: Option<String>,
}

impl Strategy {
    /// Every trade under this strategy, months flattened in order.
    pub fn trades(&self) -> impl Iterator<Item = &Trade> {
        self.months.iter().flat_map(|m| m.trades.iter())
    }

    pub fn month(&self, month_id: &str) -> Option<&Month> {
        self.months.iter().find(|m| m.id == month_id)
    }
}
