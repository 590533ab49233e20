//! Command handlers for the CLI.

mod config;
mod notes;
mod search;
mod snippets;
mod todos;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::CommandFactory;
use log::{info, warn};
use std::fmt;
use std::io;

use crate::cli::config::Config;
use crate::cli::date_filter::since_range;
use crate::cli::editor::{EditorLauncher, SystemEditor};
use crate::cli::prompt::{Confirm, StdinConfirm};
use crate::cli::{Cli, Command, CompletionsArgs, ListCommonArgs};
use crate::domain::{TagSet, ValidationError};
use crate::store::{Entity, ListOptions, Repository, Store, StoreError};

pub use config::handle_config;
pub use notes::{handle_add, handle_edit, handle_list, handle_show, handle_star};
pub use search::handle_search;
pub use snippets::handle_snippet;
pub use todos::handle_todo;

/// Runs a parsed command line.
pub fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Completions(args) => {
            handle_completions(args);
            Ok(())
        }
        Command::Config { command } => handle_config(command, &Config::config_path()),
        command => {
            let config = Config::load()?;
            let db_path = config.database_path(cli.db.as_deref());
            info!("using database {}", db_path.display());
            let store = Store::open(&db_path)
                .with_context(|| format!("failed to open database at {}", db_path.display()))?;
            let editor = SystemEditor::new(config.editor());
            run_store_command(command, &store, &editor, &StdinConfirm)
        }
    }
}

/// Runs a command that needs the record store.
pub(crate) fn run_store_command(
    command: &Command,
    store: &Store,
    editor: &dyn EditorLauncher,
    prompt: &dyn Confirm,
) -> Result<()> {
    match command {
        Command::Add(args) => handle_add(args, store, editor),
        Command::List(args) => handle_list(args, store),
        Command::Show(args) => handle_show(args, store),
        Command::Edit(args) => handle_edit(args, store, editor),
        Command::Delete(args) => delete_by_id(&store.notes(), &args.ids, args.force, prompt),
        Command::Star(args) => handle_star(args.id, true, store),
        Command::Unstar(args) => handle_star(args.id, false, store),
        Command::Search(args) => handle_search(args, store),
        Command::Snippet { command } => handle_snippet(command, store, editor, prompt),
        Command::Todo { command } => handle_todo(command, store, editor, prompt),
        Command::Config { command } => handle_config(command, &Config::config_path()),
        Command::Completions(args) => {
            handle_completions(args);
            Ok(())
        }
    }
}

fn handle_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
}

// ===========================================
// Shared Utilities
// ===========================================

/// Joins repeated `-t` values and normalizes them into one set.
pub(crate) fn parse_tags(values: &[String]) -> TagSet {
    TagSet::parse(&values.join(","))
}

/// `None` when no `-t` flag was given, so an edit leaves tags alone.
pub(crate) fn replacement_tags(values: &[String]) -> Option<TagSet> {
    (!values.is_empty()).then(|| parse_tags(values))
}

/// Builds list options from the flags every `list` command shares.
pub(crate) fn common_list_options(args: &ListCommonArgs) -> Result<ListOptions> {
    let now = Utc::now();
    let mut options = ListOptions::new().tags(parse_tags(&args.tags)).offset(args.offset);
    options.created =
        since_range("created", args.created.as_deref(), now).map_err(ValidationError::new)?;
    options.updated =
        since_range("updated", args.updated.as_deref(), now).map_err(ValidationError::new)?;
    options.sort = args.sort;
    options.reverse = args.reverse;
    options.limit = args.limit;
    Ok(options)
}

/// Deletes records after reporting missing ids and asking for confirmation.
///
/// The records about to be removed are listed before the prompt.
pub(crate) fn delete_by_id<E: Entity + fmt::Display>(
    repo: &Repository<'_, E>,
    ids: &[i64],
    force: bool,
    prompt: &dyn Confirm,
) -> Result<()> {
    let mut existing: Vec<E> = Vec::new();
    for &id in ids {
        if existing.iter().any(|record| record.id() == id) {
            continue;
        }
        match repo.find(id)? {
            Some(record) => existing.push(record),
            None => warn!("{} #{} not found, skipping", E::KIND, id),
        }
    }

    if existing.is_empty() {
        return match ids.first() {
            Some(&id) => Err(StoreError::not_found(E::KIND, id).into()),
            None => Ok(()),
        };
    }

    if !force {
        print!("{}", deletion_listing(&existing));
        if !prompt.confirm(&format!("Delete {} item(s)?", existing.len()))? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let ids: Vec<i64> = existing.iter().map(|record| record.id()).collect();
    let removed = repo.delete(&ids)?;
    println!("Deleted {} {}(s).", removed, E::KIND);
    Ok(())
}

/// One indented line per record, shown above the delete prompt.
pub(crate) fn deletion_listing<E: fmt::Display>(records: &[E]) -> String {
    records
        .iter()
        .map(|record| format!("  {}\n", record))
        .collect()
}
