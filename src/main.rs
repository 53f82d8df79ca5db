use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = tasklist::cli::Cli::parse();
    let config = tasklist::config::from_cli(&cli)?;
    tasklist::logging::init(&config, cli.log_filter.as_deref())?;

    match cli.command {
        Some(tasklist::cli::CliCommand::Tui) | None => {
            tasklist::tui::run(config)?;
        }
        Some(command) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            tasklist::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
