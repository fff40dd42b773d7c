use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::StoreError;

/// Raw strategy row as the remote store returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

/// Raw month row, keyed to its parent strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthRow {
    pub id: String,
    pub strategy_id: String,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
}

/// Raw trade row. Dates, direction and result travel as strings; the mapper
/// turns them into the typed internal shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRow {
    pub id: String,
    pub month_id: String,
    pub date: String,
    pub pair: String,
    pub direction: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub risk_reward: f64,
    pub result: String,
    pub profit_loss_dollar: f64,
    pub profit_loss_percent: f64,
    pub trade_count: u32,
    #[serde(default)]
    pub max_percent: Option<f64>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStrategyRow {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMonthRow {
    pub strategy_id: String,
    pub name: String,
    pub year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTradeRow {
    pub month_id: String,
    pub date: String,
    pub pair: String,
    pub direction: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub risk_reward: f64,
    pub result: String,
    pub profit_loss_dollar: f64,
    pub profit_loss_percent: f64,
    pub trade_count: u32,
    pub max_percent: Option<f64>,
}

/// Partial update payloads. Absent fields are left untouched remotely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StrategyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MonthPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TradePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_reward: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_loss_dollar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_loss_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trade_count: Option<u32>,
    /// Outer None = untouched, inner None = cleared remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_percent: Option<Option<f64>>,
}

/// Remote table operations the journal is built on. Three tables with
/// foreign-key containment (month -> strategy, trade -> month); the store
/// assigns row ids and creation timestamps, and cascades deletes from
/// parent to children.
///
/// List operations return strategies and months in creation order and
/// trades in date order, matching the order the journal renders them in.
#[async_trait]
pub trait TableStore: Send + Sync {
    async fn list_strategies(&self) -> Result<Vec<StrategyRow>, StoreError>;
    async fn insert_strategy(&self, row: NewStrategyRow) -> Result<StrategyRow, StoreError>;
    async fn update_strategy(&self, id: &str, patch: StrategyPatch) -> Result<(), StoreError>;
    async fn delete_strategy(&self, id: &str) -> Result<(), StoreError>;

    async fn list_months(&self) -> Result<Vec<MonthRow>, StoreError>;
    async fn insert_month(&self, row: NewMonthRow) -> Result<MonthRow, StoreError>;
    async fn update_month(&self, id: &str, patch: MonthPatch) -> Result<(), StoreError>;
    async fn delete_month(&self, id: &str) -> Result<(), StoreError>;

    async fn list_trades(&self) -> Result<Vec<TradeRow>, StoreError>;
    async fn insert_trade(&self, row: NewTradeRow) -> Result<TradeRow, StoreError>;
    async fn update_trade(&self, id: &str, patch: TradePatch) -> Result<(), StoreError>;
    async fn delete_trade(&self, id: &str) -> Result<(), StoreError>;
}
