//! CLI command definitions and handlers

pub mod config;
pub mod date_filter;
pub mod editor;
pub mod handlers;
pub mod output;
pub mod prompt;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{Priority, parse_due_date};
use crate::store::{SearchScope, SortKey};
use chrono::NaiveDate;
use output::OutputFormat;

/// qnote - notes, code snippets and todos in one local database
#[derive(Parser, Debug)]
#[command(name = "qnote", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides $QNOTE_DB and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a note
    Add(NoteAddArgs),

    /// List notes
    #[command(visible_alias = "ls")]
    List(NoteListArgs),

    /// Show a note
    Show(ShowArgs),

    /// Edit a note (opens the editor when no field is given)
    Edit(NoteEditArgs),

    /// Delete notes
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Star a note
    Star(IdArgs),

    /// Remove the star from a note
    Unstar(IdArgs),

    /// Search notes, snippets and todos
    Search(SearchArgs),

    /// Manage code snippets
    Snippet {
        #[command(subcommand)]
        command: SnippetCommand,
    },

    /// Manage todos
    Todo {
        #[command(subcommand)]
        command: TodoCommand,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Subcommand, Debug)]
pub enum SnippetCommand {
    /// Add a snippet
    Add(SnippetAddArgs),

    /// List snippets
    #[command(visible_alias = "ls")]
    List(SnippetListArgs),

    /// Show a snippet
    Show(ShowArgs),

    /// Edit a snippet (opens the editor when no field is given)
    Edit(SnippetEditArgs),

    /// Delete snippets
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),

    /// Star a snippet
    Star(IdArgs),

    /// Remove the star from a snippet
    Unstar(IdArgs),
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Add a todo
    Add(TodoAddArgs),

    /// List todos
    #[command(visible_alias = "ls")]
    List(TodoListArgs),

    /// Show a todo
    Show(ShowArgs),

    /// Mark todos as done
    Done(IdsArgs),

    /// Mark todos as pending again
    Undone(IdsArgs),

    /// Edit a todo (opens the description in the editor when no field is given)
    Edit(TodoEditArgs),

    /// Delete todos
    #[command(visible_alias = "rm")]
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show every setting
    List,

    /// Print one setting
    Get {
        /// Setting name (editor, pager, theme, database.path)
        key: String,
    },

    /// Change one setting (an empty value unsets it)
    Set { key: String, value: String },

    /// Restore defaults, keeping a backup of the current file
    Reset,

    /// Print the config file location
    Path,
}

// ===========================================
// Shared arguments
// ===========================================

/// Filters, sorting and paging shared by every `list` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ListCommonArgs {
    /// Filter by tags, comma-separated (repeatable; all must match)
    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Sort key: created, updated, title (todos also: due, priority)
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Reverse the sort direction
    #[arg(short, long)]
    pub reverse: bool,

    /// Created on or after (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub created: Option<String>,

    /// Updated on or after (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub updated: Option<String>,

    /// Maximum number of results (default 50)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    /// Number of results to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    pub id: i64,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Args, Debug)]
pub struct IdsArgs {
    #[arg(required = true)]
    pub ids: Vec<i64>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(required = true)]
    pub ids: Vec<i64>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

// ===========================================
// Notes
// ===========================================

#[derive(Args, Debug, Default)]
pub struct NoteAddArgs {
    /// Note content (opens the editor when omitted)
    pub content: Option<String>,

    /// Tags, comma-separated (repeatable)
    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub starred: bool,

    /// Compose the content in the editor
    #[arg(short, long)]
    pub edit: bool,
}

#[derive(Args, Debug, Default)]
pub struct NoteListArgs {
    #[command(flatten)]
    pub common: ListCommonArgs,

    /// Only starred notes
    #[arg(long)]
    pub starred: bool,
}

#[derive(Args, Debug, Default)]
pub struct NoteEditArgs {
    pub id: i64,

    /// Replace the content
    #[arg(long)]
    pub content: Option<String>,

    /// Replace the title (empty clears it)
    #[arg(long)]
    pub title: Option<String>,

    /// Replace the tags, comma-separated
    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

// ===========================================
// Snippets
// ===========================================

#[derive(Args, Debug, Default)]
pub struct SnippetAddArgs {
    /// Snippet code (opens the editor when omitted)
    pub code: Option<String>,

    /// Language (detected from --from-file when omitted)
    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// Read the code from a file
    #[arg(long, value_name = "PATH", conflicts_with = "code")]
    pub from_file: Option<PathBuf>,

    #[arg(long)]
    pub starred: bool,

    /// Compose the code in the editor
    #[arg(short, long)]
    pub edit: bool,
}

#[derive(Args, Debug, Default)]
pub struct SnippetListArgs {
    #[command(flatten)]
    pub common: ListCommonArgs,

    /// Only snippets in this language (case-insensitive)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Only starred snippets
    #[arg(long)]
    pub starred: bool,
}

#[derive(Args, Debug, Default)]
pub struct SnippetEditArgs {
    pub id: i64,

    #[arg(long)]
    pub code: Option<String>,

    /// Replace the language (empty clears it)
    #[arg(short, long)]
    pub language: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short = 'D', long)]
    pub description: Option<String>,

    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

// ===========================================
// Todos
// ===========================================

#[derive(Args, Debug, Default)]
pub struct TodoAddArgs {
    pub title: String,

    /// Priority: low, medium, high
    #[arg(short, long, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Due date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_due_date)]
    pub due: Option<NaiveDate>,

    #[arg(short = 'D', long)]
    pub description: Option<String>,

    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct TodoListArgs {
    #[command(flatten)]
    pub common: ListCommonArgs,

    /// Only pending todos
    #[arg(long, conflicts_with = "completed")]
    pub pending: bool,

    /// Only completed todos
    #[arg(long)]
    pub completed: bool,

    /// Only this priority
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Only pending todos past their due date
    #[arg(long)]
    pub overdue: bool,
}

#[derive(Args, Debug, Default)]
pub struct TodoEditArgs {
    pub id: i64,

    #[arg(long)]
    pub title: Option<String>,

    /// Replace the description (empty clears it)
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// New due date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_due_date, conflicts_with = "no_due")]
    pub due: Option<NaiveDate>,

    /// Remove the due date
    #[arg(long)]
    pub no_due: bool,

    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,
}

// ===========================================
// Search & completions
// ===========================================

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive substring)
    pub query: String,

    /// Restrict to one kind: note, snippet, todo or all
    #[arg(long = "type", default_value_t = SearchScope::All)]
    pub scope: SearchScope,

    /// Filter results by tags, comma-separated (all must match)
    #[arg(short, long = "tags", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Maximum number of results (default 50)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    pub limit: Option<i64>,

    /// Number of results to skip
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_todo_add() {
        let cli = Cli::try_parse_from([
            "qnote", "todo", "add", "Review PR", "-p", "high", "-d", "2026-03-15",
        ])
        .unwrap();
        match cli.command {
            Command::Todo {
                command: TodoCommand::Add(args),
            } => {
                assert_eq!(args.priority, Priority::High);
                assert_eq!(args.due, NaiveDate::from_ymd_opt(2026, 3, 15));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_priority_and_date() {
        assert!(Cli::try_parse_from(["qnote", "todo", "add", "x", "-p", "urgent"]).is_err());
        assert!(Cli::try_parse_from(["qnote", "todo", "add", "x", "-d", "15/03/2026"]).is_err());
    }

    #[test]
    fn pending_conflicts_with_completed() {
        assert!(
            Cli::try_parse_from(["qnote", "todo", "list", "--pending", "--completed"]).is_err()
        );
    }

    #[test]
    fn global_db_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["qnote", "list", "--db", "/tmp/x.db", "-vv"]).unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn negative_limit_reaches_handler() {
        let cli = Cli::try_parse_from(["qnote", "list", "--limit", "-1"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.common.limit, Some(-1)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
