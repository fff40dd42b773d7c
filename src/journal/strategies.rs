use crate::api::{NewStrategyRow, StrategyPatch, TableStore};

use super::{Journal, JournalError};

impl<S: TableStore> Journal<S> {
    /// Creates a strategy and reloads. Returns the server-assigned id.
    pub async fn add_strategy(&mut self, name: &str) -> Result<String, JournalError> {
        let row = self
            .store
            .insert_strategy(NewStrategyRow { name: name.to_string() })
            .await
            .map_err(|e| {
                log::error!("Failed to add strategy '{}': {}", name, e);
                JournalError::from(e)
            })?;

        self.reload().await?;
        Ok(row.id)
    }

    pub async fn rename_strategy(&mut self, id: &str, name: &str) -> Result<(), JournalError> {
        self.require_strategy(id)?;

        self.store
            .update_strategy(id, StrategyPatch { name: Some(name.to_string()), notes: None })
            .await
            .map_err(|e| {
                log::error!("Failed to rename strategy {}: {}", id, e);
                JournalError::from(e)
            })?;

        self.reload().await
    }

    pub async fn update_strategy_notes(&mut self, id: &str, notes: &str) -> Result<(), JournalError> {
        self.require_strategy(id)?;

        self.store
            .update_strategy(id, StrategyPatch { name: None, notes: Some(notes.to_string()) })
            .await
            .map_err(|e| {
                log::error!("Failed to update notes for strategy {}: {}", id, e);
                JournalError::from(e)
            })?;

        self.reload().await
    }

    /// Deletes a strategy; the store cascades its months and trades.
    pub async fn delete_strategy(&mut self, id: &str) -> Result<(), JournalError> {
        self.require_strategy(id)?;

        self.store.delete_strategy(id).await.map_err(|e| {
            log::error!("Failed to delete strategy {}: {}", id, e);
            JournalError::from(e)
        })?;

        self.reload().await
    }
}
