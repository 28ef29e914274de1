//! CLI schema for the `todo` binary.

use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use todo_core::DEFAULT_STORAGE_FILE;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(about = "A tiny persistent to-do list")]
#[command(version)]
pub struct Cli {
    /// Storage file (relative paths resolve against the working directory)
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_STORAGE_FILE)]
    pub file: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, value_name = "LEVEL", default_value = todo_core::default_log_level())]
    pub log_level: String,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands. Task numbers are 1-based as printed by `list`.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print tasks
    List {
        /// Hide completed tasks
        #[arg(long)]
        hide_done: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a task; words are joined with single spaces
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Check or uncheck a task
    Toggle { number: NonZeroUsize },
    /// Delete a task
    #[command(alias = "rm")]
    Remove { number: NonZeroUsize },
    /// Delete all completed tasks
    ClearCompleted,
    /// Delete every task
    ClearAll,
    /// Print total and completed counts
    Summary,
    /// Interactive session; every input line is flushed before the next
    Shell,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::num::NonZeroUsize;
    use std::path::Path;

    #[test]
    fn defaults_to_working_directory_storage() {
        let cli = Cli::try_parse_from(["todo", "summary"]).unwrap();
        assert_eq!(cli.file, Path::new("todos.dat"));
        assert_eq!(cli.log_dir, None);
        assert_eq!(cli.command, Command::Summary);
    }

    #[test]
    fn add_collects_words() {
        let cli = Cli::try_parse_from(["todo", "-f", "/tmp/x.dat", "add", "buy", "milk"]).unwrap();
        assert_eq!(cli.file, Path::new("/tmp/x.dat"));
        assert_eq!(
            cli.command,
            Command::Add {
                text: vec!["buy".to_string(), "milk".to_string()]
            }
        );
    }

    #[test]
    fn task_numbers_are_one_based() {
        let cli = Cli::try_parse_from(["todo", "rm", "2"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Remove {
                number: NonZeroUsize::new(2).unwrap()
            }
        );
        assert!(Cli::try_parse_from(["todo", "toggle", "0"]).is_err());
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from(["todo", "list", "--hide-done", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Command::List {
                hide_done: true,
                json: true
            }
        );
    }
}
