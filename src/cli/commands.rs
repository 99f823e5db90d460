//! CLI command implementations

use std::io::{self, IsTerminal};

use tracing::debug;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::CliResult;
use crate::console::Console;
use crate::observability;
use crate::storage::FileStorage;

/// Main CLI entry point
///
/// Parses arguments, resolves configuration, installs logging and
/// dispatches. This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let config = Config::resolve(cli.config.as_deref(), cli.file)?;
    observability::init(config.log_level.as_deref());
    run_command(cli.command.unwrap_or(Command::Console), &config)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command, config: &Config) -> CliResult<()> {
    match cmd {
        Command::Console => console(config),
        Command::Exec { words } => exec(config, &words.join(" ")),
    }
}

/// Load the store and read commands from stdin until `quit` or EOF.
///
/// The prompt is shown only when stdin is a terminal.
pub fn console(config: &Config) -> CliResult<()> {
    let storage = FileStorage::open(&config.file_path)?;
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    debug!(interactive, "console starting");

    let mut console = Console::new(storage, io::stdout()).with_prompt(config.prompt.clone());
    console.run(stdin.lock(), interactive)?;
    Ok(())
}

/// Load the store, execute one command line, and exit.
pub fn exec(config: &Config, line: &str) -> CliResult<()> {
    let storage = FileStorage::open(&config.file_path)?;
    let mut console = Console::new(storage, io::stdout());
    console.onecmd(line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_in(tmp: &TempDir) -> Config {
        Config {
            file_path: tmp.path().join("file.json"),
            ..Config::default()
        }
    }

    #[test]
    fn test_exec_runs_one_command_and_persists() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        let words = vec!["create".to_string(), "User".to_string()];

        run_command(Command::Exec { words }, &config).unwrap();

        let content: serde_json::Value =
            serde_json::from_slice(&fs::read(&config.file_path).unwrap()).unwrap();
        let keys: Vec<&String> = content.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 1);
        assert!(keys[0].starts_with("User."));
    }

    #[test]
    fn test_exec_against_corrupt_store() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp);
        fs::write(&config.file_path, "{ not json").unwrap();

        let words = vec!["count".to_string(), "User".to_string()];
        let err = run_command(Command::Exec { words }, &config).unwrap_err();
        assert_eq!(err.code(), "HBNB_CORRUPT_STATE");
    }
}
