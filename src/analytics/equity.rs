use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::Trade;

/// One chart point per trade: the running profit/loss percentage after that
/// trade, with the 1-based trade number for the x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub trade: usize,
    pub equity: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquityTrend {
    Gain,
    Loss,
}

/// Prefix sums of profit_loss_percent in input order. Empty in, empty out.
pub fn equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut cumulative = 0.0;
    trades
        .iter()
        .enumerate()
        .map(|(index, trade)| {
            cumulative += trade.profit_loss_percent;
            EquityPoint {
                trade: index + 1,
                equity: cumulative,
                date: trade.date,
            }
        })
        .collect()
}

/// Rendering direction, decided by the sign of the final cumulative value.
pub fn curve_trend(points: &[EquityPoint]) -> Option<EquityTrend> {
    points.last().map(|point| {
        if point.equity >= 0.0 {
            EquityTrend::Gain
        } else {
            EquityTrend::Loss
        }
    })
}
