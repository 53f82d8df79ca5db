use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single to-do item. Field order is the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 3] = [TaskFilter::All, TaskFilter::Pending, TaskFilter::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Pending => "Pending",
            TaskFilter::Completed => "Completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => !task.completed,
            TaskFilter::Completed => task.completed,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            TaskFilter::All => 0,
            TaskFilter::Pending => 1,
            TaskFilter::Completed => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Number of tasks this filter selects, read off precomputed stats.
    pub fn count_in(&self, stats: &TaskStats) -> usize {
        match self {
            TaskFilter::All => stats.total,
            TaskFilter::Pending => stats.pending,
            TaskFilter::Completed => stats.completed,
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "pending" | "active" | "todo" => Ok(TaskFilter::Pending),
            "completed" | "done" => Ok(TaskFilter::Completed),
            other => Err(anyhow!(
                "Unknown filter '{}': expected all|pending|completed",
                other
            )),
        }
    }
}

impl ValueEnum for TaskFilter {
    fn value_variants<'a>() -> &'a [Self] {
        &Self::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        let value = clap::builder::PossibleValue::new(self.as_str());
        Some(match self {
            TaskFilter::All => value,
            TaskFilter::Pending => value.aliases(["active", "todo"]),
            TaskFilter::Completed => value.alias("done"),
        })
    }
}

/// Aggregate counts, recomputed from scratch for every render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }

    /// Completion percentage rounded half-up; `None` for an empty collection.
    pub fn progress(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let percent = (self.completed * 100 + self.total / 2) / self.total;
        Some(percent as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub id: u64,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub id: u64,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task(id: u64, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            completed,
        }
    }

    #[test]
    fn new_task_starts_pending() {
        let task = Task::new(7, "Buy milk");
        assert_eq!(task.id, 7);
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);
    }

    #[rstest]
    #[case("all", TaskFilter::All)]
    #[case("Pending", TaskFilter::Pending)]
    #[case("todo", TaskFilter::Pending)]
    #[case("COMPLETED", TaskFilter::Completed)]
    #[case("done", TaskFilter::Completed)]
    fn filter_parses_names_and_aliases(#[case] raw: &str, #[case] expected: TaskFilter) {
        assert_eq!(raw.parse::<TaskFilter>().unwrap(), expected);
    }

    #[test]
    fn filter_rejects_unknown_names() {
        let err = "someday".parse::<TaskFilter>().unwrap_err();
        assert!(err.to_string().contains("someday"));
    }

    #[test]
    fn filter_cycles_in_display_order() {
        assert_eq!(TaskFilter::All.next(), TaskFilter::Pending);
        assert_eq!(TaskFilter::Completed.next(), TaskFilter::All);
        assert_eq!(TaskFilter::All.prev(), TaskFilter::Completed);
        assert_eq!(TaskFilter::default(), TaskFilter::All);
    }

    #[test]
    fn stats_count_each_status() {
        let tasks = vec![task(1, true), task(2, false), task(3, false)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(TaskFilter::Pending.count_in(&stats), 2);
    }

    #[test]
    fn progress_is_suppressed_for_empty_collection() {
        assert_eq!(TaskStats::from_tasks(&[]).progress(), None);
    }

    #[rstest]
    #[case(1, 2, 50)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 8, 13)]
    #[case(0, 4, 0)]
    #[case(4, 4, 100)]
    fn progress_rounds_half_up(#[case] done: usize, #[case] total: usize, #[case] expected: u8) {
        let tasks: Vec<Task> = (0..total).map(|i| task(i as u64, i < done)).collect();
        assert_eq!(TaskStats::from_tasks(&tasks).progress(), Some(expected));
    }
}
