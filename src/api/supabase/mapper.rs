use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::api::client::{MonthRow, StrategyRow, TradeRow};
use crate::api::error::StoreError;
use crate::models::{Direction, Month, Strategy, Trade, TradeResult};

/// Map a wire trade row to the typed internal shape.
pub fn map_trade(row: &TradeRow) -> Result<Trade, StoreError> {
    Ok(Trade {
        id: row.id.clone(),
        date: parse_date(&row.date)?,
        pair: row.pair.clone(),
        direction: parse_direction(&row.direction)?,
        entry_price: row.entry_price,
        exit_price: row.exit_price,
        risk_reward: row.risk_reward,
        result: parse_result(&row.result)?,
        profit_loss_dollar: row.profit_loss_dollar,
        profit_loss_percent: row.profit_loss_percent,
        trade_count: row.trade_count,
        max_percent: row.max_percent,
    })
}

/// Assemble the nested strategy view from the three flat table reads,
/// preserving fetch order at every level. A trade whose month is missing
/// (or a month whose strategy is missing) is a row the cascade should have
/// removed; it is reported as a parse error rather than silently dropped.
pub fn assemble(
    strategy_rows: &[StrategyRow],
    month_rows: &[MonthRow],
    trade_rows: &[TradeRow],
) -> Result<Vec<Strategy>, StoreError> {
    let mut strategies: Vec<Strategy> = strategy_rows
        .iter()
        .map(|row| {
            Ok(Strategy {
                id: row.id.clone(),
                name: row.name.clone(),
                created_at: parse_timestamp(&row.created_at)?,
                months: Vec::new(),
                notes: row.notes.clone(),
            })
        })
        .collect::<Result<_, StoreError>>()?;

    let mut months: Vec<(String, Month)> = month_rows
        .iter()
        .map(|row| {
            (
                row.strategy_id.clone(),
                Month {
                    id: row.id.clone(),
                    name: row.name.clone(),
                    year: row.year,
                    trades: Vec::new(),
                    notes: row.notes.clone(),
                },
            )
        })
        .collect();

    for row in trade_rows {
        let month = months
            .iter_mut()
            .find(|(_, month)| month.id == row.month_id)
            .map(|(_, month)| month)
            .ok_or_else(|| {
                StoreError::Parse(format!("Trade {} references unknown month {}", row.id, row.month_id))
            })?;
        month.trades.push(map_trade(row)?);
    }

    for (strategy_id, month) in months {
        let strategy = strategies
            .iter_mut()
            .find(|s| s.id == strategy_id)
            .ok_or_else(|| {
                StoreError::Parse(format!(
                    "Month {} references unknown strategy {}",
                    month.id, strategy_id
                ))
            })?;
        strategy.months.push(month);
    }

    Ok(strategies)
}

fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| StoreError::Parse(format!("Invalid trade date '{}': {}", raw, e)))
}

/// Timestamps arrive as RFC 3339 with offset, or bare (implicitly UTC)
/// depending on the column type.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Parse(format!("Invalid timestamp '{}': {}", raw, e)))
}

fn parse_direction(raw: &str) -> Result<Direction, StoreError> {
    match raw {
        "long" => Ok(Direction::Long),
        "short" => Ok(Direction::Short),
        other => Err(StoreError::Parse(format!("Unknown trade direction '{}'", other))),
    }
}

fn parse_result(raw: &str) -> Result<TradeResult, StoreError> {
    match raw {
        "win" => Ok(TradeResult::Win),
        "loss" => Ok(TradeResult::Loss),
        other => Err(StoreError::Parse(format!("Unknown trade result '{}'", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy_row(id: &str) -> StrategyRow {
        StrategyRow {
            id: id.to_string(),
            name: format!("Strategy {}", id),
            notes: None,
            created_at: "2024-01-10T08:30:00+00:00".to_string(),
        }
    }

    fn month_row(id: &str, strategy_id: &str) -> MonthRow {
        MonthRow {
            id: id.to_string(),
            strategy_id: strategy_id.to_string(),
            name: "March".to_string(),
            year: 2024,
            notes: None,
            created_at: "2024-03-01T00:00:00+00:00".to_string(),
        }
    }

    fn trade_row(id: &str, month_id: &str, date: &str) -> TradeRow {
        TradeRow {
            id: id.to_string(),
            month_id: month_id.to_string(),
            date: date.to_string(),
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
            created_at: "2024-03-05T09:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_assemble_nests_in_fetch_order() {
        let strategies = vec![strategy_row("s1"), strategy_row("s2")];
        let months = vec![month_row("m1", "s1"), month_row("m2", "s2"), month_row("m3", "s1")];
        let trades = vec![
            trade_row("t1", "m1", "2024-03-04"),
            trade_row("t2", "m3", "2024-03-05"),
            trade_row("t3", "m1", "2024-03-06"),
        ];

        let view = assemble(&strategies, &months, &trades).unwrap();

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].months.len(), 2);
        assert_eq!(view[0].months[0].id, "m1");
        assert_eq!(view[0].months[1].id, "m3");
        assert_eq!(view[1].months.len(), 1);

        let m1_trades: Vec<&str> = view[0].months[0].trades.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(m1_trades, vec!["t1", "t3"]);
    }

    #[test]
    fn test_trade_with_unknown_month_is_a_parse_error() {
        let strategies = vec![strategy_row("s1")];
        let months = vec![month_row("m1", "s1")];
        let trades = vec![trade_row("t1", "m-gone", "2024-03-04")];

        let result = assemble(&strategies, &months, &trades);
        assert!(matches!(result, Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_map_trade_rejects_bad_direction() {
        let mut row = trade_row("t1", "m1", "2024-03-04");
        row.direction = "sideways".to_string();

        assert!(matches!(map_trade(&row), Err(StoreError::Parse(_))));
    }

    #[test]
    fn test_map_trade_parses_typed_fields() {
        let row = trade_row("t1", "m1", "2024-03-04");
        let trade = map_trade(&row).unwrap();

        assert_eq!(trade.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(trade.direction, Direction::Long);
        assert_eq!(trade.result, TradeResult::Win);
    }

    #[test]
    fn test_timestamp_without_offset_is_utc() {
        let ts = parse_timestamp("2024-01-10T08:30:00.123456").unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }
}
