use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tasktally", version, about = "Terminal task list with per-category progress")]
pub struct Cli {
    /// Use this task file instead of the project or global store
    #[arg(long, global = true, env = "TASKTALLY_STORE")]
    pub store: Option<PathBuf>,
    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a project task store in the current directory
    Init,
    /// List tasks
    List {
        /// Only show tasks in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a new task
    Add {
        /// Task text
        text: String,
        /// personal, work, school or health
        #[arg(long, short)]
        category: String,
    },
    /// Mark a task as done
    Done {
        /// Position shown by `list` (starting at 1)
        position: usize,
        /// Mark the task as not done instead
        #[arg(long)]
        undo: bool,
    },
    /// Replace the text of a task
    Edit {
        /// Position shown by `list` (starting at 1)
        position: usize,
        /// New text
        text: String,
    },
    /// Delete a task
    Rm {
        /// Position shown by `list` (starting at 1)
        position: usize,
    },
    /// Show per-category completion
    Stats,
    /// Launch the interactive TUI
    Tui,
}
