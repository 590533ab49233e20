//! Snippet command handlers.

use anyhow::{Context, Result};
use std::fs;

use super::{common_list_options, delete_by_id, parse_tags, replacement_tags};
use crate::cli::editor::{EditorLauncher, compose};
use crate::cli::output::{OutputFormat, snippet_detail, snippet_table, to_json};
use crate::cli::prompt::Confirm;
use crate::cli::{ShowArgs, SnippetAddArgs, SnippetCommand, SnippetEditArgs, SnippetListArgs};
use crate::domain::{NewSnippet, SnippetPatch, ValidationError, detect_language, editor_extension};
use crate::store::Store;

pub fn handle_snippet(
    command: &SnippetCommand,
    store: &Store,
    editor: &dyn EditorLauncher,
    prompt: &dyn Confirm,
) -> Result<()> {
    match command {
        SnippetCommand::Add(args) => handle_add(args, store, editor),
        SnippetCommand::List(args) => handle_list(args, store),
        SnippetCommand::Show(args) => handle_show(args, store),
        SnippetCommand::Edit(args) => handle_edit(args, store, editor),
        SnippetCommand::Delete(args) => {
            delete_by_id(&store.snippets(), &args.ids, args.force, prompt)
        }
        SnippetCommand::Star(args) => handle_star(args.id, true, store),
        SnippetCommand::Unstar(args) => handle_star(args.id, false, store),
    }
}

fn handle_add(args: &SnippetAddArgs, store: &Store, editor: &dyn EditorLauncher) -> Result<()> {
    let mut language = args.language.clone();

    let code = if let Some(path) = &args.from_file {
        if language.is_none() {
            language = detect_language(path).map(str::to_string);
        }
        fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    } else {
        match &args.code {
            Some(code) if !args.edit => code.clone(),
            initial => compose(
                editor,
                initial.as_deref().unwrap_or(""),
                editor_extension(language.as_deref()),
            )?
            .ok_or_else(|| ValidationError::empty_field("snippet code"))?,
        }
    };

    let mut new = NewSnippet::new(code)
        .tags(parse_tags(&args.tags))
        .starred(args.starred);
    if let Some(language) = language {
        new = new.language(language);
    }
    if let Some(title) = &args.title {
        new = new.title(title);
    }
    if let Some(description) = &args.description {
        new = new.description(description);
    }

    let snippet = store.snippets().create(new).context("failed to add snippet")?;
    match snippet.language() {
        Some(lang) => println!("Added snippet #{} ({})", snippet.id(), lang),
        None => println!("Added snippet #{}", snippet.id()),
    }
    Ok(())
}

fn handle_list(args: &SnippetListArgs, store: &Store) -> Result<()> {
    let mut options = common_list_options(&args.common)?;
    options.language = args.language.clone();
    if args.starred {
        options.starred = Some(true);
    }

    let snippets = store.snippets().list(&options)?;
    match args.common.format {
        OutputFormat::Human => println!("{}", snippet_table(&snippets)),
        OutputFormat::Json => println!("{}", to_json(&snippets)?),
    }
    Ok(())
}

fn handle_show(args: &ShowArgs, store: &Store) -> Result<()> {
    let snippet = store.snippets().get(args.id)?;
    match args.format {
        OutputFormat::Human => println!("{}", snippet_detail(&snippet)),
        OutputFormat::Json => println!("{}", to_json(&snippet)?),
    }
    Ok(())
}

fn handle_edit(args: &SnippetEditArgs, store: &Store, editor: &dyn EditorLauncher) -> Result<()> {
    let snippets = store.snippets();
    let mut patch = SnippetPatch::new();
    if let Some(code) = &args.code {
        patch = patch.code(code);
    }
    if let Some(language) = &args.language {
        patch = patch.language(language);
    }
    if let Some(title) = &args.title {
        patch = patch.title(title);
    }
    if let Some(description) = &args.description {
        patch = patch.description(description);
    }
    if let Some(tags) = replacement_tags(&args.tags) {
        patch = patch.tags(tags);
    }

    if patch.is_empty() {
        let current = snippets.get(args.id)?;
        let extension = editor_extension(current.language());
        match compose(editor, current.code(), extension)? {
            Some(code) => patch = patch.code(code),
            None => {
                println!("No changes.");
                return Ok(());
            }
        }
    }

    let snippet = snippets
        .update(args.id, patch)
        .with_context(|| format!("failed to update snippet #{}", args.id))?;
    println!("Updated snippet #{}", snippet.id());
    Ok(())
}

fn handle_star(id: i64, starred: bool, store: &Store) -> Result<()> {
    let snippet = store.snippets().set_starred(id, starred)?;
    let verb = if starred { "Starred" } else { "Unstarred" };
    println!("{} snippet #{}", verb, snippet.id());
    Ok(())
}
