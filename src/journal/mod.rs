mod months;
mod state;
mod stats;
mod strategies;
mod trades;

pub use state::{AppState, SnapshotError};

use thiserror::Error;

use crate::api::supabase::mapper;
use crate::api::{StoreError, TableStore};
use crate::models::{Month, Strategy, Trade};

#[derive(Error, Debug)]
pub enum JournalError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Unknown month: {0}")]
    UnknownMonth(String),

    #[error("Unknown trade: {0}")]
    UnknownTrade(String),
}

/// The journal service: one store, one assembled view, one logical writer.
/// Every successful write is followed by a full reload before the view is
/// considered consistent; a failed write leaves the view untouched.
pub struct Journal<S: TableStore> {
    store: S,
    state: AppState,
}

impl<S: TableStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self { store, state: AppState::default() }
    }

    /// Resumes from a startup snapshot; callers still reload before writing.
    pub fn with_state(store: S, state: AppState) -> Self {
        Self { store, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fetches the three tables and assembles the nested view, preserving
    /// fetch order (strategies/months by creation, trades by date).
    pub async fn reload(&mut self) -> Result<(), JournalError> {
        let (strategy_rows, month_rows, trade_rows) = tokio::try_join!(
            self.store.list_strategies(),
            self.store.list_months(),
            self.store.list_trades(),
        )
        .map_err(|e| {
            log::error!("Failed to load journal data: {}", e);
            e
        })?;

        let view = mapper::assemble(&strategy_rows, &month_rows, &trade_rows)?;
        log::info!(
            "Loaded {} strategies, {} months, {} trades",
            strategy_rows.len(),
            month_rows.len(),
            trade_rows.len()
        );
        self.state.replace(view);
        Ok(())
    }

    fn require_strategy(&self, id: &str) -> Result<&Strategy, JournalError> {
        self.state
            .strategy(id)
            .ok_or_else(|| JournalError::UnknownStrategy(id.to_string()))
    }

    fn require_month(&self, strategy_id: &str, month_id: &str) -> Result<&Month, JournalError> {
        self.require_strategy(strategy_id)?;
        self.state
            .month(strategy_id, month_id)
            .ok_or_else(|| JournalError::UnknownMonth(month_id.to_string()))
    }

    fn require_trade(
        &self,
        strategy_id: &str,
        month_id: &str,
        trade_id: &str,
    ) -> Result<&Trade, JournalError> {
        self.require_month(strategy_id, month_id)?
            .trade(trade_id)
            .ok_or_else(|| JournalError::UnknownTrade(trade_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MemoryStore;

    #[tokio::test]
    async fn test_with_state_serves_snapshot_until_reload() {
        let mut seeded = Journal::new(MemoryStore::new());
        seeded.add_strategy("Breakout").await.unwrap();
        let snapshot = AppState::from_json(&seeded.state().to_json().unwrap()).unwrap();

        // Fresh store, restored view: the snapshot answers reads until the
        // first reload replaces it with what the store actually holds.
        let mut journal = Journal::with_state(MemoryStore::new(), snapshot);
        assert_eq!(journal.state().strategies().len(), 1);

        journal.reload().await.unwrap();
        assert!(journal.state().strategies().is_empty());
    }
}
