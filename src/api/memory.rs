use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::client::{
    MonthPatch, MonthRow, NewMonthRow, NewStrategyRow, NewTradeRow, StrategyPatch, StrategyRow,
    TableStore, TradePatch, TradeRow,
};
use super::error::StoreError;

#[derive(Default)]
struct Tables {
    strategies: Vec<StrategyRow>,
    months: Vec<MonthRow>,
    trades: Vec<TradeRow>,
}

/// In-memory table store with the same contract as the hosted backend:
/// server-assigned ids and timestamps, creation-ordered strategy/month
/// listings, date-ordered trade listings, and foreign-key cascade on
/// delete. Used by tests and offline runs.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    fn now() -> String {
        Utc::now().to_rfc3339()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    async fn list_strategies(&self) -> Result<Vec<StrategyRow>, StoreError> {
        Ok(self.tables.lock().await.strategies.clone())
    }

    async fn insert_strategy(&self, row: NewStrategyRow) -> Result<StrategyRow, StoreError> {
        let stored = StrategyRow {
            id: Self::next_id(),
            name: row.name,
            notes: None,
            created_at: Self::now(),
        };
        self.tables.lock().await.strategies.push(stored.clone());
        Ok(stored)
    }

    async fn update_strategy(&self, id: &str, patch: StrategyPatch) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let strategy = tables
            .strategies
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("strategy {}", id)))?;

        if let Some(name) = patch.name {
            strategy.name = name;
        }
        if let Some(notes) = patch.notes {
            strategy.notes = Some(notes);
        }
        Ok(())
    }

    async fn delete_strategy(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.strategies.retain(|s| s.id != id);

        // Cascade: orphaned months and their trades go with the strategy.
        let removed_months: Vec<String> = tables
            .months
            .iter()
            .filter(|m| m.strategy_id == id)
            .map(|m| m.id.clone())
            .collect();
        tables.months.retain(|m| m.strategy_id != id);
        tables.trades.retain(|t| !removed_months.contains(&t.month_id));
        Ok(())
    }

    async fn list_months(&self) -> Result<Vec<MonthRow>, StoreError> {
        Ok(self.tables.lock().await.months.clone())
    }

    async fn insert_month(&self, row: NewMonthRow) -> Result<MonthRow, StoreError> {
        let stored = MonthRow {
            id: Self::next_id(),
            strategy_id: row.strategy_id,
            name: row.name,
            year: row.year,
            notes: None,
            created_at: Self::now(),
        };
        self.tables.lock().await.months.push(stored.clone());
        Ok(stored)
    }

    async fn update_month(&self, id: &str, patch: MonthPatch) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let month = tables
            .months
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("month {}", id)))?;

        if let Some(name) = patch.name {
            month.name = name;
        }
        if let Some(notes) = patch.notes {
            month.notes = Some(notes);
        }
        Ok(())
    }

    async fn delete_month(&self, id: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.months.retain(|m| m.id != id);
        tables.trades.retain(|t| t.month_id != id);
        Ok(())
    }

    async fn list_trades(&self) -> Result<Vec<TradeRow>, StoreError> {
        let tables = self.tables.lock().await;
        let mut trades = tables.trades.clone();
        // ISO dates sort chronologically as strings; ties keep insert order.
        trades.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(trades)
    }

    async fn insert_trade(&self, row: NewTradeRow) -> Result<TradeRow, StoreError> {
        let stored = TradeRow {
            id: Self::next_id(),
            month_id: row.month_id,
            date: row.date,
            pair: row.pair,
            direction: row.direction,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            risk_reward: row.risk_reward,
            result: row.result,
            profit_loss_dollar: row.profit_loss_dollar,
            profit_loss_percent: row.profit_loss_percent,
            trade_count: row.trade_count,
            max_percent: row.max_percent,
            created_at: Self::now(),
        };
        self.tables.lock().await.trades.push(stored.clone());
        Ok(stored)
    }

    async fn update_trade(&self, id: &str, patch: TradePatch) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        let trade = tables
            .trades
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("trade {}", id)))?;

        if let Some(date) = patch.date {
            trade.date = date;
        }
        if let Some(pair) = patch.pair {
            trade.pair = pair;
        }
        if let Some(direction) = patch.direction {
            trade.direction = direction;
        }
        if let Some(entry_price) = patch.entry_price {
            trade.entry_price = entry_price;
        }
        if let Some(exit_price) = patch.exit_price {
            trade.exit_price = exit_price;
        }
        if let Some(risk_reward) = patch.risk_reward {
            trade.risk_reward = risk_reward;
        }
        if let Some(result) = patch.result {
            trade.result = result;
        }
        if let Some(dollar) = patch.profit_loss_dollar {
            trade.profit_loss_dollar = dollar;
        }
        if let Some(percent) = patch.profit_loss_percent {
            trade.profit_loss_percent = percent;
        }
        if let Some(count) = patch.trade_count {
            trade.trade_count = count;
        }
        if let Some(max_percent) = patch.max_percent {
            trade.max_percent = max_percent;
        }
        Ok(())
    }

    async fn delete_trade(&self, id: &str) -> Result<(), StoreError> {
        self.tables.lock().await.trades.retain(|t| t.id != id);
        Ok(())
    }
}
