use serde::{Deserialize, Serialize};

use crate::models::{Trade, TradeResult};

/// Aggregate performance over an ordered trade sequence. Pure data: built
/// from scratch on every call, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSummary {
    /// Raw record count.
    pub entries: usize,
    /// Records with result = win (not weighted by trade_count).
    pub wins: usize,
    /// Records with result = loss.
    pub losses: usize,
    /// Sum of per-record trade_count multipliers.
    pub total_trade_count: u32,
    /// Sum of strictly positive profit_loss_percent values.
    pub total_profit: f64,
    /// Absolute sum of strictly negative profit_loss_percent values.
    pub total_loss: f64,
}

impl TradeSummary {
    pub fn collect<'a, I>(trades: I) -> Self
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        let mut summary = TradeSummary::default();

        for trade in trades {
            summary.entries += 1;
            match trade.result {
                TradeResult::Win => summary.wins += 1,
                TradeResult::Loss => summary.losses += 1,
            }
            summary.total_trade_count += trade.trade_count;

            if trade.profit_loss_percent > 0.0 {
                summary.total_profit += trade.profit_loss_percent;
            } else if trade.profit_loss_percent < 0.0 {
                summary.total_loss += trade.profit_loss_percent.abs();
            }
        }

        summary
    }

    /// Wins over record count, as a percentage. Zero for an empty sequence.
    pub fn win_rate(&self) -> f64 {
        if self.entries > 0 {
            (self.wins as f64 / self.entries as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn net_profit(&self) -> f64 {
        self.total_profit - self.total_loss
    }

    /// One decimal place, the literal "0" when nothing is logged yet.
    pub fn win_rate_display(&self) -> String {
        if self.entries > 0 {
            format!("{:.1}", self.win_rate())
        } else {
            "0".to_string()
        }
    }

    pub fn total_profit_display(&self) -> String {
        format!("+{:.2}%", self.total_profit)
    }

    pub fn total_loss_display(&self) -> String {
        format!("-{:.2}%", self.total_loss)
    }

    /// Signed, with an explicit leading `+` when non-negative.
    pub fn net_profit_display(&self) -> String {
        let net = self.net_profit();
        if net >= 0.0 {
            format!("+{:.2}%", net)
        } else {
            format!("{:.2}%", net)
        }
    }
}
