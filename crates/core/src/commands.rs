use crate::capture::CaptureInput;
use crate::config::AppConfig;
use crate::database::Database;
use crate::model::{DeleteResult, Task, TaskFilter, ToggleOutcome};
use crate::persistence::MemorySlot;
use crate::store::TaskStore;
use crate::view::ViewSnapshot;

/// Open the durable slot for `config` and rehydrate a store from it.
///
/// An unusable database never stops a session: the store falls back to an
/// in-memory slot and the failure is logged.
pub fn open_store(config: &AppConfig) -> TaskStore {
    match Database::open_or_recover(config) {
        Ok(database) => TaskStore::open(database),
        Err(err) => {
            tracing::warn!(
                error = %format!("{err:#}"),
                db = %config.db_path().display(),
                "task database unavailable, changes will not be saved"
            );
            TaskStore::open(MemorySlot::new())
        }
    }
}

/// Capture a task, returning `None` when the input was blank.
pub fn add_task(config: &AppConfig, input: &CaptureInput) -> Option<Task> {
    let title = input.title()?;
    open_store(config).add(&title)
}

/// Flip the completion flag of each id and return per-id results.
pub fn toggle_tasks(config: &AppConfig, ids: &[u64]) -> Vec<ToggleOutcome> {
    let mut store = open_store(config);
    ids.iter()
        .map(|&id| ToggleOutcome {
            id,
            completed: store.toggle(id),
        })
        .collect()
}

/// Delete the tasks with the provided ids and return per-id results.
pub fn delete_tasks(config: &AppConfig, ids: &[u64]) -> Vec<DeleteResult> {
    let mut store = open_store(config);
    ids.iter()
        .map(|&id| DeleteResult {
            id,
            deleted: store.delete(id).is_some(),
        })
        .collect()
}

pub fn list_tasks(config: &AppConfig, filter: TaskFilter) -> ViewSnapshot {
    ViewSnapshot::capture(&open_store(config), filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn capture(words: &[&str]) -> CaptureInput {
        CaptureInput {
            text: words.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn commands_share_persisted_state() {
        let (config, _dir) = temp_config();
        let a = add_task(&config, &capture(&["Pay", "rent"])).expect("task");
        let b = add_task(&config, &capture(&["Stretch"])).expect("task");

        let toggled = toggle_tasks(&config, &[a.id, 404]);
        assert_eq!(
            toggled,
            vec![
                ToggleOutcome {
                    id: a.id,
                    completed: Some(true)
                },
                ToggleOutcome {
                    id: 404,
                    completed: None
                },
            ]
        );

        let completed = list_tasks(&config, TaskFilter::Completed);
        assert_eq!(completed.tasks.len(), 1);
        assert_eq!(completed.tasks[0].title, "Pay rent");
        assert_eq!(completed.stats.total, 2);

        let deleted = delete_tasks(&config, &[b.id, 404]);
        assert!(deleted[0].deleted);
        assert!(!deleted[1].deleted);
        assert_eq!(list_tasks(&config, TaskFilter::All).tasks.len(), 1);
    }

    #[test]
    fn blank_capture_does_not_touch_storage() {
        let (config, _dir) = temp_config();
        assert!(add_task(&config, &capture(&["  ", ""])).is_none());
        assert!(list_tasks(&config, TaskFilter::All).is_empty());
    }

    #[test]
    fn corrupt_database_starts_empty_and_keeps_working() {
        let (config, _dir) = temp_config();
        fs::write(config.db_path(), vec![0x5Au8; 4096]).expect("write garbage");

        let snapshot = list_tasks(&config, TaskFilter::All);
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.stats.total, 0);

        let task = add_task(&config, &capture(&["Recovered"])).expect("task");
        assert_eq!(task.id, 1);
        assert_eq!(list_tasks(&config, TaskFilter::All).tasks, vec![task]);
    }

    #[test]
    fn unreachable_data_dir_falls_back_to_memory() {
        let (_config, dir) = temp_config();
        let config = AppConfig::from_data_dir(dir.path().join("missing").join("dir"))
            .expect("config");

        assert!(list_tasks(&config, TaskFilter::All).is_empty());
        assert!(add_task(&config, &capture(&["Ephemeral"])).is_some());
        assert!(list_tasks(&config, TaskFilter::All).is_empty());
    }
}
