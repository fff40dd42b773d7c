use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::models::{Month, Strategy};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The assembled journal view plus lookup indexes. The strategy list is the
/// serialized truth; indexes are derived and rebuilt whenever the list is
/// replaced, so lookups stay constant-time as the journal grows.
#[derive(Debug, Default)]
pub struct AppState {
    strategies: Vec<Strategy>,
    strategy_index: HashMap<String, usize>,
    /// month id -> (strategy position, month position within it)
    month_index: HashMap<String, (usize, usize)>,
}

impl AppState {
    pub fn new(strategies: Vec<Strategy>) -> Self {
        let mut state = Self { strategies, ..Self::default() };
        state.rebuild_index();
        state
    }

    pub(crate) fn replace(&mut self, strategies: Vec<Strategy>) {
        self.strategies = strategies;
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.strategy_index.clear();
        self.month_index.clear();

        for (si, strategy) in self.strategies.iter().enumerate() {
            self.strategy_index.insert(strategy.id.clone(), si);
            for (mi, month) in strategy.months.iter().enumerate() {
                self.month_index.insert(month.id.clone(), (si, mi));
            }
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn strategy(&self, id: &str) -> Option<&Strategy> {
        self.strategy_index.get(id).map(|&si| &self.strategies[si])
    }

    /// Resolves only when the month actually belongs to the named strategy.
    pub fn month(&self, strategy_id: &str, month_id: &str) -> Option<&Month> {
        let &(si, mi) = self.month_index.get(month_id)?;
        let strategy = &self.strategies[si];
        if strategy.id != strategy_id {
            return None;
        }
        Some(&strategy.months[mi])
    }

    pub fn month_by_id(&self, month_id: &str) -> Option<&Month> {
        let &(si, mi) = self.month_index.get(month_id)?;
        Some(&self.strategies[si].months[mi])
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.strategies)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Startup/shutdown snapshot boundary: the view persists as plain JSON,
    /// indexes are rebuilt on load.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
