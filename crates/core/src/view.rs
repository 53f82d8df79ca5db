use serde::Serialize;

use crate::model::{Task, TaskFilter, TaskStats};
use crate::store::TaskStore;

/// Derived, read-only state for one render: the filtered list plus counts
/// over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub filter: TaskFilter,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
}

impl ViewSnapshot {
    pub fn capture(store: &TaskStore, filter: TaskFilter) -> Self {
        Self {
            filter,
            tasks: store.query(filter).into_iter().cloned().collect(),
            stats: store.stats(),
        }
    }

    pub fn progress(&self) -> Option<u8> {
        self.stats.progress()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}
