use crate::tui::constants::COMMAND_HELP;
use crate::tui::filters::{parse_filter_arg, FILTER_TABS};

use super::{App, InputMode};

#[derive(Debug, Clone)]
pub(crate) struct Suggestion {
    pub(crate) fill: String,
    pub(crate) label: String,
}

impl Suggestion {
    fn new(fill: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            label: label.into(),
        }
    }
}

/// Accepts `12` or `#12`.
fn parse_id_arg(raw: &str) -> Option<u64> {
    raw.trim().trim_start_matches('#').parse().ok()
}

impl App {
    pub(crate) fn run_command(&mut self) {
        let raw = self.input.as_str().trim().to_owned();
        let Some(body) = raw.strip_prefix('/') else {
            self.set_status_error("Commands must start with '/'");
            self.finish_command();
            return;
        };
        let mut parts = body.split_whitespace();
        let Some(cmd) = parts.next().map(|c| c.to_ascii_lowercase()) else {
            self.set_status_error("Enter a command after '/'");
            self.finish_command();
            return;
        };
        let rest: Vec<&str> = parts.collect();
        self.finish_command();

        match cmd.as_str() {
            "help" | "h" => self.set_status_info(COMMAND_HELP),
            "add" | "a" => {
                if rest.is_empty() {
                    self.set_status_error("Usage: /add <task description>");
                } else {
                    self.add_task(&rest.join(" "));
                }
            }
            "toggle" | "t" | "done" => match rest.first() {
                None => self.toggle_selected(),
                Some(raw_id) => match parse_id_arg(raw_id) {
                    Some(id) => self.toggle_task(id),
                    None => self.set_status_error(format!("Invalid task id: {}", raw_id)),
                },
            },
            "delete" | "del" | "rm" => match rest.first() {
                None => self.prompt_delete(),
                Some(raw_id) => match parse_id_arg(raw_id) {
                    Some(id) => self.delete_task(id),
                    None => self.set_status_error(format!("Invalid task id: {}", raw_id)),
                },
            },
            "filter" | "view" => match rest.first().and_then(|name| parse_filter_arg(name)) {
                Some(filter) => self.set_filter(filter),
                None => self.set_status_error("Usage: /filter <all|pending|completed>"),
            },
            "quit" | "q" | "exit" => self.should_quit = true,
            unknown => {
                self.set_status_error(format!("Unknown command: {} (try /help)", unknown));
            }
        }
    }

    pub(crate) fn finish_command(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_index = 0;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn update_command_suggestions(&mut self) {
        self.suggestions = build_command_suggestions(self);
        if self.suggestion_index >= self.suggestions.len() {
            self.suggestion_index = 0;
        }
    }

    pub(crate) fn accept_suggestion(&mut self) {
        if let Some(s) = self.suggestions.get(self.suggestion_index) {
            self.input.set(s.fill.clone());
            self.update_command_suggestions();
        }
    }
}

fn build_command_suggestions(app: &App) -> Vec<Suggestion> {
    let Some(without) = app.input.as_str().strip_prefix('/') else {
        return Vec::new();
    };
    let without = without.trim_start();
    let first = without
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    let has_args = without.contains(char::is_whitespace);
    let rest = without[first.len().min(without.len())..].trim();
    let selected = app.selected_task().map(|task| task.id);

    if !has_args {
        let base = [
            Suggestion::new("/help", "❓ Help — show available commands"),
            Suggestion::new("/add ", "➕ Add a task"),
            Suggestion::new("/toggle", "✅ Toggle selected task"),
            Suggestion::new("/delete", "🗑️ Delete selected task"),
            Suggestion::new("/filter ", "🔍 Switch filter (all/pending/completed)"),
            Suggestion::new("/quit", "🚪 Quit the application"),
        ];
        return base
            .into_iter()
            .filter(|s| s.fill[1..].starts_with(&first))
            .collect();
    }

    match first.as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                Vec::new()
            } else {
                vec![Suggestion::new(format!("/add {}", rest), "Add this task")]
            }
        }
        "toggle" | "t" | "done" | "delete" | "del" | "rm" => {
            let verb = if first.starts_with('d') && first != "done" {
                "delete"
            } else {
                "toggle"
            };
            match selected {
                Some(id) if rest.is_empty() => vec![Suggestion::new(
                    format!("/{} {}", verb, id),
                    "Use selected task id",
                )],
                _ => Vec::new(),
            }
        }
        "filter" | "view" => {
            let partial = rest.to_ascii_lowercase();
            FILTER_TABS
                .iter()
                .filter(|tab| tab.filter.as_str().starts_with(&partial))
                .map(|tab| {
                    Suggestion::new(
                        format!("/filter {}", tab.filter.as_str()),
                        format!("{} {}", tab.icon, tab.description),
                    )
                })
                .collect()
        }
        _ => Vec::new(),
    }
}
