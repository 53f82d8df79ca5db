use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::capture::CaptureInput;
use crate::model::TaskFilter;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "A small local task list: add, complete, delete, filter.",
    after_help = "Examples:\n  tasklist                 Launch the TUI (same as `tasklist tui`)\n  tasklist add Buy milk\n  tasklist toggle 3\n  tasklist list --filter pending\n  tasklist delete 3 4"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter written to the log file (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Add a task
    Add(AddArgs),
    /// Flip one or more tasks between pending and completed
    Toggle(IdArgs),
    /// Delete one or more tasks by id
    Delete(IdArgs),
    /// Print tasks and progress
    List(ListArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task title; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// One or more task ids (shown as `#id` by `list` and in the TUI)
    #[arg(value_name = "ID", required = true, value_parser = parse_task_id)]
    pub ids: Vec<u64>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, short, value_enum, default_value_t = TaskFilter::All)]
    pub filter: TaskFilter,

    /// Print the filtered tasks as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl From<&AddArgs> for CaptureInput {
    fn from(args: &AddArgs) -> Self {
        CaptureInput {
            text: args.text.clone(),
        }
    }
}

impl From<AddArgs> for CaptureInput {
    fn from(args: AddArgs) -> Self {
        CaptureInput { text: args.text }
    }
}

/// Accept `12` as well as the displayed `#12` form.
pub fn parse_task_id(raw: &str) -> Result<u64, String> {
    let digits = raw.trim().trim_start_matches('#');
    digits
        .parse::<u64>()
        .map_err(|_| format!("'{raw}' is not a task id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_add_words() {
        let cli = Cli::try_parse_from(["tasklist", "add", "Buy", "milk"]).unwrap();
        match cli.command {
            Some(CliCommand::Add(args)) => {
                let input = CaptureInput::from(args);
                assert_eq!(input.title().as_deref(), Some("Buy milk"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_hash_prefixed_ids() {
        let cli = Cli::try_parse_from(["tasklist", "toggle", "#3", "4"]).unwrap();
        match cli.command {
            Some(CliCommand::Toggle(args)) => assert_eq!(args.ids, vec![3, 4]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    #[case("7", Ok(7))]
    #[case("#12", Ok(12))]
    #[case(" #3 ", Ok(3))]
    #[case("-1", Err(()))]
    #[case("#", Err(()))]
    fn task_id_parser(#[case] raw: &str, #[case] expected: Result<u64, ()>) {
        assert_eq!(parse_task_id(raw).map_err(|_| ()), expected);
    }

    #[test]
    fn rejects_non_numeric_ids() {
        assert!(Cli::try_parse_from(["tasklist", "delete", "abc"]).is_err());
    }

    #[test]
    fn list_filter_defaults_to_all_and_accepts_aliases() {
        let cli = Cli::try_parse_from(["tasklist", "list"]).unwrap();
        match cli.command {
            Some(CliCommand::List(args)) => assert_eq!(args.filter, TaskFilter::All),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["tasklist", "--data-dir", "/tmp/x", "list", "-f", "done"])
            .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(CliCommand::List(args)) => assert_eq!(args.filter, TaskFilter::Completed),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tasklist"]).unwrap();
        assert!(cli.command.is_none());
    }
}
