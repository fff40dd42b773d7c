use crate::analytics::{equity_curve, EquityPoint, TradeSummary};
use crate::api::TableStore;

use super::{Journal, JournalError};

/// Read path: state -> aggregation -> caller. Nothing here touches the
/// store or mutates the view.
impl<S: TableStore> Journal<S> {
    pub fn month_summary(
        &self,
        strategy_id: &str,
        month_id: &str,
    ) -> Result<TradeSummary, JournalError> {
        let month = self.require_month(strategy_id, month_id)?;
        Ok(TradeSummary::collect(&month.trades))
    }

    pub fn month_equity(
        &self,
        strategy_id: &str,
        month_id: &str,
    ) -> Result<Vec<EquityPoint>, JournalError> {
        let month = self.require_month(strategy_id, month_id)?;
        Ok(equity_curve(&month.trades))
    }

    /// Strategy-card rollup: every trade under the strategy, months
    /// flattened in order.
    pub fn strategy_summary(&self, strategy_id: &str) -> Result<TradeSummary, JournalError> {
        let strategy = self.require_strategy(strategy_id)?;
        Ok(TradeSummary::collect(strategy.trades()))
    }
}
