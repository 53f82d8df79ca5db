use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::error::StorageError;
use crate::model::Task;

/// Fixed key of the slot holding the serialized task list.
pub const SLOT_KEY: &str = "todos";

/// A durable key-value slot the task store mirrors itself into.
pub trait Slot {
    /// Read the raw payload, `None` when nothing was ever saved.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the payload.
    fn save(&mut self, payload: &str) -> Result<(), StorageError>;
}

impl<S: Slot + ?Sized> Slot for Box<S> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        (**self).save(payload)
    }
}

/// In-process slot. Clones share the same cell, so a test can keep a handle
/// while the store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    value: Rc<RefCell<Option<String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(payload.into()))),
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl Slot for MemorySlot {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    fn save(&mut self, payload: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

pub fn encode_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(tasks)?)
}

pub fn decode_tasks(payload: &str) -> Result<Vec<Task>, StorageError> {
    Ok(serde_json::from_str(payload)?)
}

/// Read the slot and return the collection to start from.
///
/// Missing, unreadable or malformed data all yield an empty list. Records that
/// would break the store's invariants (blank title, repeated id) are dropped,
/// keeping the first occurrence.
pub fn rehydrate(slot: &dyn Slot) -> Vec<Task> {
    let payload = match slot.load() {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::debug!(key = SLOT_KEY, "no saved tasks, starting empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(key = SLOT_KEY, error = %err, "failed to read saved tasks, starting empty");
            return Vec::new();
        }
    };

    let decoded = match decode_tasks(&payload) {
        Ok(tasks) => tasks,
        Err(err) => {
            tracing::warn!(key = SLOT_KEY, error = %err, "discarding unreadable saved tasks");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(decoded.len());
    for mut task in decoded {
        let title = task.title.trim();
        if title.is_empty() {
            tracing::warn!(id = task.id, "dropping saved task with blank title");
            continue;
        }
        if !seen.insert(task.id) {
            tracing::warn!(id = task.id, "dropping saved task with duplicate id");
            continue;
        }
        if title.len() != task.title.len() {
            task.title = title.to_string();
        }
        tasks.push(task);
    }

    tracing::debug!(count = tasks.len(), "rehydrated tasks");
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                title: "Buy milk".into(),
                completed: false,
            },
            Task {
                id: 1_700_000_000_000,
                title: "Call \"Ana\" • ☎".into(),
                completed: true,
            },
        ]
    }

    #[test]
    fn encode_uses_documented_field_layout() {
        let payload = encode_tasks(&sample()[..1]).unwrap();
        assert_eq!(payload, r#"[{"id":1,"title":"Buy milk","completed":false}]"#);
    }

    #[test]
    fn decode_restores_order_and_fields() {
        let tasks = sample();
        let payload = encode_tasks(&tasks).unwrap();
        assert_eq!(decode_tasks(&payload).unwrap(), tasks);
    }

    #[test]
    fn decode_accepts_payloads_written_by_other_clients() {
        let payload = r#"[
            {"completed": true, "title": "Water plants", "id": 1712345678901},
            {"id": 2, "title": "Read", "completed": false, "extra": "ignored"}
        ]"#;
        let tasks = decode_tasks(payload).unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, 1_712_345_678_901);
        assert!(tasks[0].completed);
        assert_eq!(tasks[1].title, "Read");
    }

    #[test]
    fn rehydrate_missing_slot_is_empty() {
        assert!(rehydrate(&MemorySlot::new()).is_empty());
    }

    #[test]
    fn rehydrate_malformed_payload_is_empty() {
        for payload in ["", "not json", "{}", r#"[{"id":"x"}]"#, r#"[{"id":-1,"title":"a","completed":false}]"#] {
            let slot = MemorySlot::with_payload(payload);
            assert!(rehydrate(&slot).is_empty(), "payload {payload:?}");
        }
    }

    #[test]
    fn rehydrate_drops_records_breaking_invariants() {
        let slot = MemorySlot::with_payload(
            r#"[
                {"id": 1, "title": "  keep  ", "completed": false},
                {"id": 2, "title": "   ", "completed": false},
                {"id": 1, "title": "duplicate", "completed": true},
                {"id": 3, "title": "also keep", "completed": true}
            ]"#,
        );
        let tasks = rehydrate(&slot);
        assert_eq!(
            tasks,
            vec![
                Task {
                    id: 1,
                    title: "keep".into(),
                    completed: false
                },
                Task {
                    id: 3,
                    title: "also keep".into(),
                    completed: true
                },
            ]
        );
    }

    #[test]
    fn memory_slot_clones_share_payload() {
        let handle = MemorySlot::new();
        let mut owned = handle.clone();
        owned.save("[]").unwrap();
        assert_eq!(handle.payload().as_deref(), Some("[]"));
    }
}
