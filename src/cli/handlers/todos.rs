//! Todo command handlers.

use anyhow::{Context, Result};

use super::{common_list_options, delete_by_id, parse_tags, replacement_tags};
use crate::cli::editor::{EditorLauncher, compose};
use crate::cli::output::{OutputFormat, to_json, todo_detail, todo_table};
use crate::cli::prompt::Confirm;
use crate::cli::{IdsArgs, ShowArgs, TodoAddArgs, TodoCommand, TodoEditArgs, TodoListArgs};
use crate::domain::{NewTodo, TodoPatch};
use crate::store::{Status, Store};

pub fn handle_todo(
    command: &TodoCommand,
    store: &Store,
    editor: &dyn EditorLauncher,
    prompt: &dyn Confirm,
) -> Result<()> {
    match command {
        TodoCommand::Add(args) => handle_add(args, store),
        TodoCommand::List(args) => handle_list(args, store),
        TodoCommand::Show(args) => handle_show(args, store),
        TodoCommand::Done(args) => handle_completion(args, true, store),
        TodoCommand::Undone(args) => handle_completion(args, false, store),
        TodoCommand::Edit(args) => handle_edit(args, store, editor),
        TodoCommand::Delete(args) => delete_by_id(&store.todos(), &args.ids, args.force, prompt),
    }
}

fn handle_add(args: &TodoAddArgs, store: &Store) -> Result<()> {
    let mut new = NewTodo::new(&args.title)
        .priority(args.priority)
        .tags(parse_tags(&args.tags));
    if let Some(due) = args.due {
        new = new.due_date(due);
    }
    if let Some(description) = &args.description {
        new = new.description(description);
    }

    let todo = store.todos().create(new).context("failed to add todo")?;
    println!("Added todo #{}: {}", todo.id(), todo.title());
    Ok(())
}

fn handle_list(args: &TodoListArgs, store: &Store) -> Result<()> {
    let mut options = common_list_options(&args.common)?;
    options.priority = args.priority;
    options.overdue = args.overdue;
    options.status = match (args.pending, args.completed) {
        (true, _) => Status::Pending,
        (_, true) => Status::Completed,
        _ => Status::All,
    };

    let todos = store.todos().list(&options)?;
    match args.common.format {
        OutputFormat::Human => println!("{}", todo_table(&todos, store.today())),
        OutputFormat::Json => println!("{}", to_json(&todos)?),
    }
    Ok(())
}

fn handle_show(args: &ShowArgs, store: &Store) -> Result<()> {
    let todo = store.todos().get(args.id)?;
    match args.format {
        OutputFormat::Human => println!("{}", todo_detail(&todo, store.today())),
        OutputFormat::Json => println!("{}", to_json(&todo)?),
    }
    Ok(())
}

/// Marks every id done (or pending). Stops at the first missing id.
fn handle_completion(args: &IdsArgs, done: bool, store: &Store) -> Result<()> {
    let todos = store.todos();
    for &id in &args.ids {
        let todo = if done {
            todos.mark_done(id)?
        } else {
            todos.mark_undone(id)?
        };
        let state = if done { "done" } else { "pending" };
        println!("Marked todo #{} as {}: {}", todo.id(), state, todo.title());
    }
    Ok(())
}

fn handle_edit(args: &TodoEditArgs, store: &Store, editor: &dyn EditorLauncher) -> Result<()> {
    let todos = store.todos();
    let mut patch = TodoPatch::new();
    if let Some(title) = &args.title {
        patch = patch.title(title);
    }
    if let Some(description) = &args.description {
        patch = patch.description(description);
    }
    if let Some(priority) = args.priority {
        patch = patch.priority(priority);
    }
    if args.no_due {
        patch = patch.due_date(None);
    } else if let Some(due) = args.due {
        patch = patch.due_date(Some(due));
    }
    if let Some(tags) = replacement_tags(&args.tags) {
        patch = patch.tags(tags);
    }

    if patch.is_empty() {
        let current = todos.get(args.id)?;
        match compose(editor, current.description().unwrap_or(""), ".txt")? {
            Some(description) => patch = patch.description(description),
            None => {
                println!("No changes.");
                return Ok(());
            }
        }
    }

    let todo = todos
        .update(args.id, patch)
        .with_context(|| format!("failed to update todo #{}", args.id))?;
    println!("Updated todo #{}: {}", todo.id(), todo.title());
    Ok(())
}
