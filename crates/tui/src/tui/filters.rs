use crate::model::{TaskFilter, TaskStats};

/// Presentation data for one filter tab.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FilterTab {
    pub(crate) filter: TaskFilter,
    pub(crate) icon: &'static str,
    pub(crate) description: &'static str,
}

pub(crate) const FILTER_TABS: [FilterTab; 3] = [
    FilterTab {
        filter: TaskFilter::All,
        icon: "📋",
        description: "All tasks",
    },
    FilterTab {
        filter: TaskFilter::Pending,
        icon: "⏳",
        description: "Still to do",
    },
    FilterTab {
        filter: TaskFilter::Completed,
        icon: "✅",
        description: "Finished tasks",
    },
];

impl FilterTab {
    pub(crate) fn for_filter(filter: TaskFilter) -> &'static FilterTab {
        &FILTER_TABS[filter.index()]
    }

    pub(crate) fn title(&self, stats: &TaskStats) -> String {
        format!(
            "{} {} ({})",
            self.icon,
            self.filter.label(),
            self.filter.count_in(stats)
        )
    }
}

/// Heading and hint for an empty task list under `filter`.
pub(crate) fn empty_state(filter: TaskFilter, stats: &TaskStats) -> (&'static str, &'static str) {
    if stats.total == 0 {
        return (
            "No tasks yet 📝",
            "Create your first task to get started. Press 'a' to add one.",
        );
    }
    match filter {
        TaskFilter::All => ("No tasks yet 📝", "Press 'a' to add one."),
        TaskFilter::Pending => ("All done ✨", "Every task is completed. Press 'a' to add more."),
        TaskFilter::Completed => (
            "Nothing completed yet",
            "Select a task and press Space to mark it done.",
        ),
    }
}

/// Parse a filter name typed in the command palette.
pub(crate) fn parse_filter_arg(raw: &str) -> Option<TaskFilter> {
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_follow_filter_order() {
        for filter in TaskFilter::ALL {
            assert_eq!(FilterTab::for_filter(filter).filter, filter);
        }
    }

    #[test]
    fn tab_titles_carry_counts() {
        let stats = TaskStats {
            total: 3,
            pending: 2,
            completed: 1,
        };
        assert_eq!(FilterTab::for_filter(TaskFilter::All).title(&stats), "📋 All (3)");
        assert_eq!(
            FilterTab::for_filter(TaskFilter::Completed).title(&stats),
            "✅ Completed (1)"
        );
    }

    #[test]
    fn empty_state_prefers_global_message_when_store_is_empty() {
        let empty = TaskStats::default();
        assert_eq!(empty_state(TaskFilter::Completed, &empty).0, "No tasks yet 📝");

        let all_done = TaskStats {
            total: 1,
            pending: 0,
            completed: 1,
        };
        assert_eq!(empty_state(TaskFilter::Pending, &all_done).0, "All done ✨");
    }

    #[test]
    fn parses_filter_names() {
        assert_eq!(parse_filter_arg("Pending"), Some(TaskFilter::Pending));
        assert_eq!(parse_filter_arg("nope"), None);
    }
}
