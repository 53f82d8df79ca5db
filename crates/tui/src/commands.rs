use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::capture::CaptureInput;
use crate::cli::{AddArgs, CliCommand, IdArgs, ListArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::core::ViewSnapshot;
use crate::model::{DeleteResult, TaskFilter, TaskStats, ToggleOutcome};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(config, &args, &mut writer),
        CliCommand::Toggle(args) => handle_toggle(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<W: Write>(config: &AppConfig, args: &AddArgs, mut writer: W) -> Result<()> {
    let input = CaptureInput::from(args);
    match core_commands::add_task(config, &input) {
        Some(task) => writeln!(writer, "Added #{} {}", task.id, task.title)?,
        None => writeln!(writer, "Nothing to add")?,
    }
    Ok(())
}

fn handle_toggle<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let results = core_commands::toggle_tasks(config, &args.ids);
    ToggleSummary::from_results(&results).write_to(&mut writer)
}

fn handle_delete<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let results = core_commands::delete_tasks(config, &args.ids);
    let summary = DeleteSummary::from_results(&results);
    summary.write_to(&mut writer)?;
    Ok(())
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let snapshot = core_commands::list_tasks(config, args.filter);
    if args.json {
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        return Ok(());
    }
    write_listing(&snapshot, &mut writer)
}

fn write_listing<W: Write>(snapshot: &ViewSnapshot, mut writer: W) -> Result<()> {
    if snapshot.tasks.is_empty() {
        writeln!(writer, "{}", empty_listing(snapshot.filter, &snapshot.stats))?;
    }
    for task in &snapshot.tasks {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(writer, "[{}] #{} {}", mark, task.id, task.title)?;
    }
    writeln!(writer, "{}", StatsLine(&snapshot.stats))?;
    Ok(())
}

fn empty_listing(filter: TaskFilter, stats: &TaskStats) -> &'static str {
    match filter {
        _ if stats.total == 0 => "No tasks yet",
        TaskFilter::All => "No tasks yet",
        TaskFilter::Pending => "No pending tasks",
        TaskFilter::Completed => "No completed tasks",
    }
}

struct StatsLine<'a>(&'a TaskStats);

impl fmt::Display for StatsLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        write!(
            f,
            "{} total • {} pending • {} completed",
            stats.total, stats.pending, stats.completed
        )?;
        if let Some(progress) = stats.progress() {
            write!(f, " • {}% done", progress)?;
        }
        Ok(())
    }
}

struct ToggleSummary {
    completed: usize,
    reopened: usize,
    missing: Vec<u64>,
}

impl ToggleSummary {
    fn from_results(results: &[ToggleOutcome]) -> Self {
        let mut summary = Self {
            completed: 0,
            reopened: 0,
            missing: Vec::new(),
        };
        for result in results {
            match result.completed {
                Some(true) => summary.completed += 1,
                Some(false) => summary.reopened += 1,
                None => summary.missing.push(result.id),
            }
        }
        summary
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.completed == 0 && self.reopened == 0 {
            writeln!(writer, "No tasks toggled")?;
        }
        if self.completed > 0 {
            writeln!(writer, "Completed {}", plural_tasks(self.completed))?;
        }
        if self.reopened > 0 {
            writeln!(writer, "Reopened {}", plural_tasks(self.reopened))?;
        }
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", join_ids(&self.missing))?;
        }
        Ok(())
    }
}

struct DeleteSummary {
    deleted: usize,
    missing: Vec<u64>,
}

impl DeleteSummary {
    fn from_results(results: &[DeleteResult]) -> Self {
        let mut deleted = 0usize;
        let mut missing = Vec::new();
        for result in results {
            if result.deleted {
                deleted += 1;
            } else {
                missing.push(result.id);
            }
        }
        Self { deleted, missing }
    }

    fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", SummaryLine::deleted(self.deleted))?;
        if !self.missing.is_empty() {
            writeln!(writer, "Not found: {}", join_ids(&self.missing))?;
        }
        Ok(())
    }
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(f, "Deleted {}", plural_tasks(*count)),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
        }
    }
}

fn plural_tasks(count: usize) -> String {
    format!("{} task{}", count, if count == 1 { "" } else { "s" })
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    fn add(config: &AppConfig, words: &[&str]) -> String {
        run(
            config,
            CliCommand::Add(AddArgs {
                text: words.iter().map(|w| w.to_string()).collect(),
            }),
        )
    }

    fn list(config: &AppConfig, filter: TaskFilter, json: bool) -> String {
        run(config, CliCommand::List(ListArgs { filter, json }))
    }

    #[test]
    fn add_reports_new_id_and_ignores_blank_text() {
        let (config, _dir) = temp_config();
        assert_eq!(add(&config, &["Buy", "milk"]), "Added #1 Buy milk\n");
        assert_eq!(add(&config, &["   "]), "Nothing to add\n");
        assert_eq!(add(&config, &["Walk"]), "Added #2 Walk\n");
    }

    #[test]
    fn list_shows_marks_and_progress() {
        let (config, _dir) = temp_config();
        add(&config, &["A"]);
        add(&config, &["B"]);
        run(&config, CliCommand::Toggle(IdArgs { ids: vec![1] }));

        assert_eq!(
            list(&config, TaskFilter::All, false),
            "[x] #1 A\n[ ] #2 B\n2 total • 1 pending • 1 completed • 50% done\n"
        );
        assert_eq!(
            list(&config, TaskFilter::Pending, false),
            "[ ] #2 B\n2 total • 1 pending • 1 completed • 50% done\n"
        );
    }

    #[test]
    fn list_on_empty_store_omits_progress() {
        let (config, _dir) = temp_config();
        assert_eq!(
            list(&config, TaskFilter::All, false),
            "No tasks yet\n0 total • 0 pending • 0 completed\n"
        );
    }

    #[test]
    fn list_reports_empty_filter() {
        let (config, _dir) = temp_config();
        add(&config, &["A"]);
        assert!(list(&config, TaskFilter::Completed, false).starts_with("No completed tasks\n"));
    }

    #[test]
    fn list_json_carries_tasks_and_stats() {
        let (config, _dir) = temp_config();
        add(&config, &["A"]);
        add(&config, &["B"]);
        run(&config, CliCommand::Toggle(IdArgs { ids: vec![1] }));

        let output = list(&config, TaskFilter::Completed, true);
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["filter"], "completed");
        assert_eq!(value["stats"]["total"], 2);
        assert_eq!(value["stats"]["completed"], 1);

        let tasks: Vec<Task> = serde_json::from_value(value["tasks"].clone()).expect("tasks");
        assert_eq!(
            tasks,
            vec![Task {
                id: 1,
                title: "A".into(),
                completed: true
            }]
        );
    }

    #[test]
    fn toggle_command_summarizes_each_direction() {
        let (config, _dir) = temp_config();
        add(&config, &["A"]);
        add(&config, &["B"]);
        run(&config, CliCommand::Toggle(IdArgs { ids: vec![2] }));

        let output = run(&config, CliCommand::Toggle(IdArgs { ids: vec![1, 2, 9] }));
        assert_eq!(
            output,
            "Completed 1 task\nReopened 1 task\nNot found: #9\n"
        );

        let output = run(&config, CliCommand::Toggle(IdArgs { ids: vec![9] }));
        assert_eq!(output, "No tasks toggled\nNot found: #9\n");
    }

    #[test]
    fn delete_command_reports_deleted_and_missing() {
        let (config, _dir) = temp_config();
        add(&config, &["Test"]);

        let output = run(&config, CliCommand::Delete(IdArgs { ids: vec![1, 42] }));
        assert!(output.contains("Deleted 1 task"));
        assert!(output.contains("Not found: #42"));
    }

    #[test]
    fn delete_command_handles_no_matches() {
        let (config, _dir) = temp_config();
        let output = run(&config, CliCommand::Delete(IdArgs { ids: vec![42] }));
        assert!(output.contains("No tasks deleted"));
    }

    #[test]
    fn tui_command_is_rejected() {
        let (config, _dir) = temp_config();
        let mut output = Vec::new();
        assert!(execute(&config, CliCommand::Tui, &mut output).is_err());
    }
}
