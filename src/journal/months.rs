use crate::api::{MonthPatch, NewMonthRow, TableStore};

use super::{Journal, JournalError};

impl<S: TableStore> Journal<S> {
    /// Creates a month under the strategy and reloads. Returns the new id.
    pub async fn add_month(
        &mut self,
        strategy_id: &str,
        name: &str,
        year: i32,
    ) -> Result<String, JournalError> {
        self.require_strategy(strategy_id)?;

        let row = self
            .store
            .insert_month(NewMonthRow {
                strategy_id: strategy_id.to_string(),
                name: name.to_string(),
                year,
            })
            .await
            .map_err(|e| {
                log::error!("Failed to add month '{}' to strategy {}: {}", name, strategy_id, e);
                JournalError::from(e)
            })?;

        self.reload().await?;
        Ok(row.id)
    }

    pub async fn rename_month(
        &mut self,
        strategy_id: &str,
        month_id: &str,
        name: &str,
    ) -> Result<(), JournalError> {
        self.require_month(strategy_id, month_id)?;

        self.store
            .update_month(month_id, MonthPatch { name: Some(name.to_string()), notes: None })
            .await
            .map_err(|e| {
                log::error!("Failed to rename month {}: {}", month_id, e);
                JournalError::from(e)
            })?;

        self.reload().await
    }

    pub async fn update_month_notes(
        &mut self,
        month_id: &str,
        notes: &str,
    ) -> Result<(), JournalError> {
        if self.state.month_by_id(month_id).is_none() {
            return Err(JournalError::UnknownMonth(month_id.to_string()));
        }

        self.store
            .update_month(month_id, MonthPatch { name: None, notes: Some(notes.to_string()) })
            .await
            .map_err(|e| {
                log::error!("Failed to update notes for month {}: {}", month_id, e);
                JournalError::from(e)
            })?;

        self.reload().await
    }

    /// Deletes a month; the store cascades its trades.
    pub async fn delete_month(
        &mut self,
        strategy_id: &str,
        month_id: &str,
    ) -> Result<(), JournalError> {
        self.require_month(strategy_id, month_id)?;

        self.store.delete_month(month_id).await.map_err(|e| {
            log::error!("Failed to delete month {}: {}", month_id, e);
            JournalError::from(e)
        })?;

        self.reload().await
    }
}
