use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::buffer::TextBuffer;
use super::constants::*;
use crate::capture::normalize_title;
use crate::config::AppConfig;
use crate::core::ViewSnapshot;
use crate::model::{Task, TaskFilter};
use crate::store::TaskStore;

mod commands;
mod input;
mod render;

use commands::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Command,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

/// View layer state. The store is the only owner of tasks; everything else
/// here is derived from it or transient UI state.
pub(crate) struct App {
    config: AppConfig,
    store: TaskStore,
    filter: TaskFilter,
    view: ViewSnapshot,
    selected: usize,
    table_state: TableState,
    input_mode: InputMode,
    input: TextBuffer,
    suggestions: Vec<Suggestion>,
    suggestion_index: usize,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, store: TaskStore) -> Self {
        let mut app = Self {
            config,
            store,
            filter: TaskFilter::default(),
            view: ViewSnapshot::default(),
            selected: 0,
            table_state: TableState::default(),
            input_mode: InputMode::Normal,
            input: TextBuffer::new(),
            suggestions: Vec::new(),
            suggestion_index: 0,
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Recompute the visible list and counts from the store.
    pub(crate) fn refresh(&mut self) {
        self.view = ViewSnapshot::capture(&self.store, self.filter);
        if self.view.is_empty() {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= self.view.tasks.len() {
                self.selected = self.view.tasks.len() - 1;
            }
            self.table_state.select(Some(self.selected));
        }
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_task(&self) -> Option<&Task> {
        self.view.tasks.get(self.selected)
    }

    fn select_next(&mut self) {
        if self.view.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.view.tasks.len() - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.view.is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        if !self.view.is_empty() {
            self.selected = 0;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_last(&mut self) {
        if !self.view.is_empty() {
            self.selected = self.view.tasks.len() - 1;
            self.table_state.select(Some(self.selected));
        }
    }

    fn select_task_by_id(&mut self, id: u64) {
        if let Some(idx) = self.view.position_of(id) {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn set_filter(&mut self, filter: TaskFilter) {
        if self.filter == filter {
            return;
        }
        self.filter = filter;
        self.selected = 0;
        self.refresh();
        tracing::debug!(filter = filter.as_str(), "filter changed");
    }

    fn next_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    fn prev_filter(&mut self) {
        self.set_filter(self.filter.prev());
    }

    fn begin_add(&mut self) {
        self.input_mode = InputMode::Add;
        self.input.clear();
        self.set_status_info(STATUS_ENTER_ADD);
    }

    /// Submit the add prompt. Blank input keeps the prompt open and changes nothing.
    fn submit_add(&mut self) {
        let Some(title) = normalize_title(self.input.as_str()) else {
            return;
        };
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.add_task(&title);
    }

    fn add_task(&mut self, title: &str) {
        let Some(task) = self.store.add(title) else {
            return;
        };
        self.refresh();
        self.select_task_by_id(task.id);
        self.set_status_info(format!("Added #{} {}", task.id, task.title));
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            self.set_status_info("Nothing to toggle");
            return;
        };
        self.toggle_task(id);
    }

    fn toggle_task(&mut self, id: u64) {
        let Some(completed) = self.store.toggle(id) else {
            return;
        };
        self.refresh();
        self.select_task_by_id(id);
        if completed {
            self.set_status_info(format!("Completed #{} ✅", id));
        } else {
            self.set_status_info(format!("Reopened #{}", id));
        }
    }

    fn prompt_delete(&mut self) {
        if self.view.is_empty() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            return;
        };
        self.delete_task(id);
    }

    fn delete_task(&mut self, id: u64) {
        let Some(task) = self.store.delete(id) else {
            return;
        };
        self.refresh();
        self.set_status_info(format!("Deleted #{} {} 🗑️", task.id, task.title));
    }

    fn show_help_overlay(&mut self) {
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
