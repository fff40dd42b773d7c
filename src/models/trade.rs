use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeResult {
    Win,
    Loss,
}

impl TradeResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeResult::Win => "win",
            TradeResult::Loss => "loss",
        }
    }
}

/// A single logged position. Sign invariant: both profit/loss fields carry
/// the sign dictated by `result` (loss => non-positive, win => non-negative).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub date: NaiveDate,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub risk_reward: f64,
    pub result: TradeResult,
    pub profit_loss_dollar: f64,
    pub profit_loss_percent: f64,
    /// Multiplier for aggregate counting, not the record count.
    pub trade_count: u32,
    /// Maximum favorable excursion, tracked for wins only.
    pub max_percent: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrade {
    pub date: NaiveDate,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub risk_reward: f64,
    pub result: TradeResult,
    pub profit_loss_dollar: f64,
    pub profit_loss_percent: f64,
    pub trade_count: u32,
    pub max_percent: Option<f64>,
}

impl NewTrade {
    /// Blank row the way the grid seeds one: long, win, 1:2, zeroed P/L.
    pub fn draft(date: NaiveDate, pair: impl Into<String>) -> Self {
        Self {
            date,
            pair: pair.into(),
            direction: Direction::Long,
            entry_price: 0.0,
            exit_price: 0.0,
            risk_reward: 2.0,
            result: TradeResult::Win,
            profit_loss_dollar: 0.0,
            profit_loss_percent: 0.0,
            trade_count: 1,
            max_percent: None,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.profit_loss_dollar = signed_by(self.result, self.profit_loss_dollar);
        self.profit_loss_percent = signed_by(self.result, self.profit_loss_percent);
        self
    }
}

/// One field-level edit. Each variant carries an already-validated payload;
/// the `*_from_input` constructors do the raw-string coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeEdit {
    Date(NaiveDate),
    Pair(String),
    Direction(Direction),
    EntryPrice(f64),
    ExitPrice(f64),
    RiskReward(f64),
    Result(TradeResult),
    ProfitLossDollar(f64),
    ProfitLossPercent(f64),
    TradeCount(u32),
    MaxPercent(Option<f64>),
}

impl TradeEdit {
    /// Parses as a float, 0 on failure.
    pub fn risk_reward_from_input(raw: &str) -> Self {
        TradeEdit::RiskReward(raw.trim().parse().unwrap_or(0.0))
    }

    /// Parses as an integer, 1 on failure or non-positive input.
    pub fn trade_count_from_input(raw: &str) -> Self {
        let count = raw.trim().parse::<u32>().ok().filter(|n| *n > 0).unwrap_or(1);
        TradeEdit::TradeCount(count)
    }

    /// Parses as a float, cleared to absent on failure.
    pub fn max_percent_from_input(raw: &str) -> Self {
        TradeEdit::MaxPercent(raw.trim().parse().ok())
    }

    pub fn profit_loss_dollar_from_input(raw: &str) -> Self {
        TradeEdit::ProfitLossDollar(raw.trim().parse().unwrap_or(0.0))
    }

    pub fn profit_loss_percent_from_input(raw: &str) -> Self {
        TradeEdit::ProfitLossPercent(raw.trim().parse().unwrap_or(0.0))
    }
}

fn signed_by(result: TradeResult, value: f64) -> f64 {
    match result {
        TradeResult::Win => value.abs(),
        TradeResult::Loss => -value.abs(),
    }
}

impl Trade {
    /// Applies one edit, keeping the sign invariant: a result edit re-signs
    /// both P/L fields, a magnitude edit re-applies the current result's sign.
    pub fn apply(&mut self, edit: TradeEdit) {
        match edit {
            TradeEdit::Date(date) => self.date = date,
            TradeEdit::Pair(pair) => self.pair = pair,
            TradeEdit::Direction(direction) => self.direction = direction,
            TradeEdit::EntryPrice(price) => self.entry_price = price,
            TradeEdit::ExitPrice(price) => self.exit_price = price,
            TradeEdit::RiskReward(ratio) => self.risk_reward = ratio,
            TradeEdit::Result(result) => {
                self.result = result;
                self.profit_loss_dollar = signed_by(result, self.profit_loss_dollar);
                self.profit_loss_percent = signed_by(result, self.profit_loss_percent);
            }
            TradeEdit::ProfitLossDollar(value) => {
                self.profit_loss_dollar = signed_by(self.result, value);
            }
            TradeEdit::ProfitLossPercent(value) => {
                self.profit_loss_percent = signed_by(self.result, value);
            }
            TradeEdit::TradeCount(count) => self.trade_count = count,
            TradeEdit::MaxPercent(percent) => self.max_percent = percent,
        }
    }

    /// Applies a batch of edits. Result edits run first so magnitude edits
    /// in the same batch re-sign against the new result.
    pub fn apply_all(&mut self, edits: impl IntoIterator<Item = TradeEdit>) {
        let (result_edits, rest): (Vec<_>, Vec<_>) = edits
            .into_iter()
            .partition(|edit| matches!(edit, TradeEdit::Result(_)));

        for edit in result_edits.into_iter().chain(rest) {
            self.apply(edit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn win_trade() -> Trade {
        Trade {
            id: "t1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            pair: "EUR/USD".to_string(),
            direction: Direction::Long,
            entry_price: 1.0820,
            exit_price: 1.0878,
            risk_reward: 2.0,
            result: TradeResult::Win,
            profit_loss_dollar: 120.0,
            profit_loss_percent: 2.4,
            trade_count: 1,
            max_percent: Some(3.1),
        }
    }

    #[test]
    fn test_result_edit_to_loss_forces_negative() {
        let mut trade = win_trade();
        trade.apply(TradeEdit::Result(TradeResult::Loss));

        assert_eq!(trade.result, TradeResult::Loss);
        assert_eq!(trade.profit_loss_dollar, -120.0);
        assert_eq!(trade.profit_loss_percent, -2.4);
    }

    #[test]
    fn test_result_edit_to_win_forces_positive() {
        let mut trade = win_trade();
        trade.apply(TradeEdit::Result(TradeResult::Loss));
        trade.apply(TradeEdit::Result(TradeResult::Win));

        assert_eq!(trade.profit_loss_dollar, 120.0);
        assert_eq!(trade.profit_loss_percent, 2.4);
    }

    #[test]
    fn test_magnitude_edit_keeps_win_sign() {
        // Typing "-5" into a winning trade stores +5.
        let mut trade = win_trade();
        trade.apply(TradeEdit::profit_loss_percent_from_input("-5"));

        assert_eq!(trade.profit_loss_percent, 5.0);
        assert_eq!(trade.result, TradeResult::Win);
    }

    #[test]
    fn test_magnitude_edit_keeps_loss_sign() {
        let mut trade = win_trade();
        trade.apply(TradeEdit::Result(TradeResult::Loss));
        trade.apply(TradeEdit::ProfitLossDollar(75.0));

        assert_eq!(trade.profit_loss_dollar, -75.0);
    }

    #[test]
    fn test_trade_count_input_defaults() {
        assert_eq!(TradeEdit::trade_count_from_input("abc"), TradeEdit::TradeCount(1));
        assert_eq!(TradeEdit::trade_count_from_input("0"), TradeEdit::TradeCount(1));
        assert_eq!(TradeEdit::trade_count_from_input("-3"), TradeEdit::TradeCount(1));
        assert_eq!(TradeEdit::trade_count_from_input(" 4 "), TradeEdit::TradeCount(4));
    }

    #[test]
    fn test_risk_reward_input_defaults_to_zero() {
        assert_eq!(TradeEdit::risk_reward_from_input("x"), TradeEdit::RiskReward(0.0));
        assert_eq!(TradeEdit::risk_reward_from_input("2.5"), TradeEdit::RiskReward(2.5));
    }

    #[test]
    fn test_max_percent_input_clears_on_garbage() {
        assert_eq!(TradeEdit::max_percent_from_input(""), TradeEdit::MaxPercent(None));
        assert_eq!(
            TradeEdit::max_percent_from_input("1.8"),
            TradeEdit::MaxPercent(Some(1.8))
        );
    }

    #[test]
    fn test_batch_result_edit_takes_precedence() {
        // Same outcome no matter where the result edit sits in the batch.
        let mut first = win_trade();
        first.apply_all(vec![
            TradeEdit::ProfitLossPercent(3.0),
            TradeEdit::Result(TradeResult::Loss),
        ]);

        let mut second = win_trade();
        second.apply_all(vec![
            TradeEdit::Result(TradeResult::Loss),
            TradeEdit::ProfitLossPercent(3.0),
        ]);

        assert_eq!(first.profit_loss_percent, -3.0);
        assert_eq!(second.profit_loss_percent, -3.0);
    }

    #[test]
    fn test_new_trade_normalized_applies_result_sign() {
        let mut draft = NewTrade::draft(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), "GBP/USD");
        draft.result = TradeResult::Loss;
        draft.profit_loss_percent = 1.5;
        let normalized = draft.normalized();

        assert_eq!(normalized.profit_loss_percent, -1.5);
    }
}
