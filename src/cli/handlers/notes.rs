//! Note command handlers.

use anyhow::{Context, Result};

use super::{common_list_options, parse_tags, replacement_tags};
use crate::cli::editor::{EditorLauncher, compose};
use crate::cli::output::{OutputFormat, note_detail, note_table, to_json};
use crate::cli::{NoteAddArgs, NoteEditArgs, NoteListArgs, ShowArgs};
use crate::domain::{NewNote, Note, NotePatch, ValidationError};
use crate::store::Store;

pub fn handle_add(args: &NoteAddArgs, store: &Store, editor: &dyn EditorLauncher) -> Result<()> {
    let content = match &args.content {
        Some(content) if !args.edit => content.clone(),
        initial => compose(editor, initial.as_deref().unwrap_or(""), ".md")?
            .ok_or_else(|| ValidationError::empty_field("note content"))?,
    };

    let mut new = NewNote::new(content)
        .tags(parse_tags(&args.tags))
        .starred(args.starred);
    if let Some(title) = &args.title {
        new = new.title(title);
    }

    let note = store.notes().create(new).context("failed to add note")?;
    println!("Added note #{}", note.id());
    Ok(())
}

pub fn handle_list(args: &NoteListArgs, store: &Store) -> Result<()> {
    let mut options = common_list_options(&args.common)?;
    if args.starred {
        options.starred = Some(true);
    }

    let notes = store.notes().list(&options)?;
    print_notes(&notes, args.common.format)
}

fn print_notes(notes: &[Note], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => println!("{}", note_table(notes)),
        OutputFormat::Json => println!("{}", to_json(notes)?),
    }
    Ok(())
}

pub fn handle_show(args: &ShowArgs, store: &Store) -> Result<()> {
    let note = store.notes().get(args.id)?;
    match args.format {
        OutputFormat::Human => println!("{}", note_detail(&note)),
        OutputFormat::Json => println!("{}", to_json(&note)?),
    }
    Ok(())
}

pub fn handle_edit(args: &NoteEditArgs, store: &Store, editor: &dyn EditorLauncher) -> Result<()> {
    let notes = store.notes();
    let mut patch = NotePatch::new();
    if let Some(content) = &args.content {
        patch = patch.content(content);
    }
    if let Some(title) = &args.title {
        patch = patch.title(title);
    }
    if let Some(tags) = replacement_tags(&args.tags) {
        patch = patch.tags(tags);
    }

    if patch.is_empty() {
        let current = notes.get(args.id)?;
        match compose(editor, current.content(), ".md")? {
            Some(content) => patch = patch.content(content),
            None => {
                println!("No changes.");
                return Ok(());
            }
        }
    }

    let note = notes
        .update(args.id, patch)
        .with_context(|| format!("failed to update note #{}", args.id))?;
    println!("Updated note #{}", note.id());
    Ok(())
}

pub fn handle_star(id: i64, starred: bool, store: &Store) -> Result<()> {
    let note = store.notes().set_starred(id, starred)?;
    if starred {
        println!("Starred note #{}", note.id());
    } else {
        println!("Unstarred note #{}", note.id());
    }
    Ok(())
}
