//! The authoritative in-memory task collection.
//!
//! Every command completes synchronously. Invalid input (blank titles, unknown
//! ids) degrades to a no-op and nothing is ever reported as an error. Each
//! successful mutation mirrors the whole collection into the backing [`Slot`];
//! a failed write is logged and the in-memory state stays authoritative.

use crate::model::{Task, TaskFilter, TaskStats};
use crate::persistence::{encode_tasks, rehydrate, Slot};

pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    slot: Box<dyn Slot>,
}

impl TaskStore {
    /// Rehydrate from `slot`, starting empty when it holds nothing usable.
    pub fn open(slot: impl Slot + 'static) -> Self {
        let slot: Box<dyn Slot> = Box::new(slot);
        let tasks = rehydrate(slot.as_ref());
        let next_id = tasks
            .iter()
            .map(|task| task.id)
            .max()
            .map_or(1, |max| max.wrapping_add(1).max(1));
        Self {
            tasks,
            next_id,
            slot,
        }
    }

    /// Append a new pending task. Blank titles are ignored.
    pub fn add(&mut self, title: &str) -> Option<Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        let task = Task::new(self.allocate_id(), title);
        self.tasks.push(task.clone());
        tracing::debug!(id = task.id, "added task");
        self.sync();
        Some(task)
    }

    /// Flip the completion flag, returning the new value.
    pub fn toggle(&mut self, id: u64) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        tracing::debug!(id, completed, "toggled task");
        self.sync();
        Some(completed)
    }

    pub fn delete(&mut self, id: u64) -> Option<Task> {
        let position = self.tasks.iter().position(|task| task.id == id)?;
        let removed = self.tasks.remove(position);
        tracing::debug!(id, "deleted task");
        self.sync();
        Some(removed)
    }

    /// Tasks selected by `filter`, in store order.
    pub fn query(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks.iter().filter(|task| filter.matches(task)).collect()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn allocate_id(&mut self) -> u64 {
        loop {
            let candidate = self.next_id;
            self.next_id = self.next_id.wrapping_add(1).max(1);
            if self.get(candidate).is_none() {
                return candidate;
            }
        }
    }

    fn sync(&mut self) {
        let payload = match encode_tasks(&self.tasks) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode tasks, skipping save");
                return;
            }
        };
        if let Err(err) = self.slot.save(&payload) {
            tracing::warn!(error = %err, "failed to save tasks");
        }
    }
}
