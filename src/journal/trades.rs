use crate::api::{NewTradeRow, TableStore, TradePatch};
use crate::models::{NewTrade, Trade, TradeEdit};

use super::{Journal, JournalError};

const WIRE_DATE: &str = "%Y-%m-%d";

fn new_trade_row(month_id: &str, trade: NewTrade) -> NewTradeRow {
    NewTradeRow {
        month_id: month_id.to_string(),
        date: trade.date.format(WIRE_DATE).to_string(),
        pair: trade.pair,
        direction: trade.direction.as_str().to_string(),
        entry_price: trade.entry_price,
        exit_price: trade.exit_price,
        risk_reward: trade.risk_reward,
        result: trade.result.as_str().to_string(),
        profit_loss_dollar: trade.profit_loss_dollar,
        profit_loss_percent: trade.profit_loss_percent,
        trade_count: trade.trade_count,
        max_percent: trade.max_percent,
    }
}

/// Builds the remote patch for the fields the edits touched, reading the
/// post-normalization values. A result edit re-signs both P/L fields, so it
/// patches all three.
fn patch_from_edits(trade: &Trade, edits: &[TradeEdit]) -> TradePatch {
    let mut patch = TradePatch::default();

    for edit in edits {
        match edit {
            TradeEdit::Date(_) => patch.date = Some(trade.date.format(WIRE_DATE).to_string()),
            TradeEdit::Pair(_) => patch.pair = Some(trade.pair.clone()),
            TradeEdit::Direction(_) => {
                patch.direction = Some(trade.direction.as_str().to_string());
            }
            TradeEdit::EntryPrice(_) => patch.entry_price = Some(trade.entry_price),
            TradeEdit::ExitPrice(_) => patch.exit_price = Some(trade.exit_price),
            TradeEdit::RiskReward(_) => patch.risk_reward = Some(trade.risk_reward),
            TradeEdit::Result(_) => {
                patch.result = Some(trade.result.as_str().to_string());
                patch.profit_loss_dollar = Some(trade.profit_loss_dollar);
                patch.profit_loss_percent = Some(trade.profit_loss_percent);
            }
            TradeEdit::ProfitLossDollar(_) => {
                patch.profit_loss_dollar = Some(trade.profit_loss_dollar);
            }
            TradeEdit::ProfitLossPercent(_) => {
                patch.profit_loss_percent = Some(trade.profit_loss_percent);
            }
            TradeEdit::TradeCount(_) => patch.trade_count = Some(trade.trade_count),
            TradeEdit::MaxPercent(_) => patch.max_percent = Some(trade.max_percent),
        }
    }

    patch
}

impl<S: TableStore> Journal<S> {
    /// Creates a trade under the month, sign-normalized on insert, and
    /// reloads. Returns the server-assigned id.
    pub async fn add_trade(
        &mut self,
        strategy_id: &str,
        month_id: &str,
        trade: NewTrade,
    ) -> Result<String, JournalError> {
        self.require_month(strategy_id, month_id)?;

        let row = new_trade_row(month_id, trade.normalized());
        let inserted = self.store.insert_trade(row).await.map_err(|e| {
            log::error!("Failed to add trade to month {}: {}", month_id, e);
            JournalError::from(e)
        })?;

        self.reload().await?;
        Ok(inserted.id)
    }

    /// Applies the edits to the current trade (normalization included),
    /// writes the resulting patch, then reloads.
    pub async fn update_trade(
        &mut self,
        strategy_id: &str,
        month_id: &str,
        trade_id: &str,
        edits: Vec<TradeEdit>,
    ) -> Result<(), JournalError> {
        let mut updated = self.require_trade(strategy_id, month_id, trade_id)?.clone();
        updated.apply_all(edits.iter().cloned());

        let patch = patch_from_edits(&updated, &edits);
        self.store.update_trade(trade_id, patch).await.map_err(|e| {
            log::error!("Failed to update trade {}: {}", trade_id, e);
            JournalError::from(e)
        })?;

        self.reload().await
    }

    pub async fn delete_trade(
        &mut self,
        strategy_id: &str,
        month_id: &str,
        trade_id: &str,
    ) -> Result<(), JournalError> {
        self.require_trade(strategy_id, month_id, trade_id)?;

        self.store.delete_trade(trade_id).await.map_err(|e| {
            log::error!("Failed to delete trade {}: {}", trade_id, e);
            JournalError::from(e)
        })?;

        self.reload().await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::api::{
        MemoryStore, MonthPatch, MonthRow, NewMonthRow, NewStrategyRow, NewTradeRow, StoreError,
        StrategyPatch, StrategyRow, TableStore, TradePatch, TradeRow,
    };
    use crate::journal::{Journal, JournalError};
    use crate::models::{NewTrade, TradeEdit, TradeResult};

    async fn journal_with_month() -> (Journal<MemoryStore>, String, String) {
        let mut journal = Journal::new(MemoryStore::new());
        let strategy_id = journal.add_strategy("Breakout").await.unwrap();
        let month_id = journal.add_month(&strategy_id, "March", 2024).await.unwrap();
        (journal, strategy_id, month_id)
    }

    fn loss_draft(day: u32, percent: f64) -> NewTrade {
        let mut draft = NewTrade::draft(NaiveDate::from_ymd_opt(2024, 3, day).unwrap(), "EUR/USD");
        draft.result = TradeResult::Loss;
        draft.profit_loss_percent = percent;
        draft.profit_loss_dollar = percent * 50.0;
        draft
    }

    #[tokio::test]
    async fn test_add_trade_normalizes_sign_on_insert() {
        let (mut journal, strategy_id, month_id) = journal_with_month().await;

        // A loss entered with positive magnitudes is stored negative.
        journal.add_trade(&strategy_id, &month_id, loss_draft(4, 1.5)).await.unwrap();

        let month = journal.state().month(&strategy_id, &month_id).unwrap();
        assert_eq!(month.trades.len(), 1);
        assert_eq!(month.trades[0].profit_loss_percent, -1.5);
        assert_eq!(month.trades[0].profit_loss_dollar, -75.0);
    }

    #[tokio::test]
    async fn test_update_trade_reapplies_result_sign() {
        let (mut journal, strategy_id, month_id) = journal_with_month().await;
        let draft = NewTrade::draft(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "EUR/USD");
        let trade_id = journal.add_trade(&strategy_id, &month_id, draft).await.unwrap();

        // Typing "-5" into a winning trade's percent column stores +5.
        journal
            .update_trade(
                &strategy_id,
                &month_id,
                &trade_id,
                vec![TradeEdit::profit_loss_percent_from_input("-5")],
            )
            .await
            .unwrap();

        let trade = journal
            .state()
            .month(&strategy_id, &month_id)
            .unwrap()
            .trade(&trade_id)
            .unwrap();
        assert_eq!(trade.profit_loss_percent, 5.0);
        assert_eq!(trade.result, TradeResult::Win);
    }

    #[tokio::test]
    async fn test_batched_result_and_magnitude_edit() {
        let (mut journal, strategy_id, month_id) = journal_with_month().await;
        let draft = NewTrade::draft(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), "EUR/USD");
        let trade_id = journal.add_trade(&strategy_id, &month_id, draft).await.unwrap();

        journal
            .update_trade(
                &strategy_id,
                &month_id,
                &trade_id,
                vec![
                    TradeEdit::ProfitLossPercent(3.0),
                    TradeEdit::Result(TradeResult::Loss),
                ],
            )
            .await
            .unwrap();

        let trade = journal
            .state()
            .month(&strategy_id, &month_id)
            .unwrap()
            .trade(&trade_id)
            .unwrap();
        assert_eq!(trade.result, TradeResult::Loss);
        assert_eq!(trade.profit_loss_percent, -3.0);
    }

    #[tokio::test]
    async fn test_delete_trade() {
        let (mut journal, strategy_id, month_id) = journal_with_month().await;
        let trade_id = journal
            .add_trade(&strategy_id, &month_id, loss_draft(4, 1.0))
            .await
            .unwrap();

        journal.delete_trade(&strategy_id, &month_id, &trade_id).await.unwrap();

        let month = journal.state().month(&strategy_id, &month_id).unwrap();
        assert!(month.trades.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_trade_is_rejected() {
        let (mut journal, strategy_id, month_id) = journal_with_month().await;

        let err = journal
            .delete_trade(&strategy_id, &month_id, "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, JournalError::UnknownTrade(_)));
    }

    /// Delegates reads to the seeded store, fails every write.
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    fn write_failure() -> StoreError {
        StoreError::Api { status: 500, message: "write rejected".to_string() }
    }

    #[async_trait]
    impl TableStore for ReadOnlyStore {
        async fn list_strategies(&self) -> Result<Vec<StrategyRow>, StoreError> {
            self.inner.list_strategies().await
        }
        async fn insert_strategy(&self, _: NewStrategyRow) -> Result<StrategyRow, StoreError> {
            Err(write_failure())
        }
        async fn update_strategy(&self, _: &str, _: StrategyPatch) -> Result<(), StoreError> {
            Err(write_failure())
        }
        async fn delete_strategy(&self, _: &str) -> Result<(), StoreError> {
            Err(write_failure())
        }

        async fn list_months(&self) -> Result<Vec<MonthRow>, StoreError> {
            self.inner.list_months().await
        }
        async fn insert_month(&self, _: NewMonthRow) -> Result<MonthRow, StoreError> {
            Err(write_failure())
        }
        async fn update_month(&self, _: &str, _: MonthPatch) -> Result<(), StoreError> {
            Err(write_failure())
        }
        async fn delete_month(&self, _: &str) -> Result<(), StoreError> {
            Err(write_failure())
        }

        async fn list_trades(&self) -> Result<Vec<TradeRow>, StoreError> {
            self.inner.list_trades().await
        }
        async fn insert_trade(&self, _: NewTradeRow) -> Result<TradeRow, StoreError> {
            Err(write_failure())
        }
        async fn update_trade(&self, _: &str, _: TradePatch) -> Result<(), StoreError> {
            Err(write_failure())
        }
        async fn delete_trade(&self, _: &str) -> Result<(), StoreError> {
            Err(write_failure())
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_view_unchanged() {
        let seed = MemoryStore::new();
        let strategy = seed
            .insert_strategy(NewStrategyRow { name: "Breakout".to_string() })
            .await
            .unwrap();
        let month = seed
            .insert_month(NewMonthRow {
                strategy_id: strategy.id.clone(),
                name: "March".to_string(),
                year: 2024,
            })
            .await
            .unwrap();
        let trade = seed
            .insert_trade(NewTradeRow {
                month_id: month.id.clone(),
                date: "2024-03-04".to_string(),
                pair: "EUR/USD".to_string(),
                direction: "long".to_string(),
                entry_price: 1.08,
                exit_price: 1.09,
                risk_reward: 2.0,
                result: "win".to_string(),
                profit_loss_dollar: 100.0,
                profit_loss_percent: 2.0,
                trade_count: 1,
                max_percent: None,
            })
            .await
            .unwrap();

        let mut journal = Journal::new(ReadOnlyStore { inner: seed });
        journal.reload().await.unwrap();
        let before = journal.state().to_json().unwrap();

        let err = journal
            .update_trade(
                &strategy.id,
                &month.id,
                &trade.id,
                vec![TradeEdit::ProfitLossPercent(9.0)],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, JournalError::Store(_)));
        assert_eq!(journal.state().to_json().unwrap(), before);
    }
}
