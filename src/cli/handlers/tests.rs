use super::*;
use crate::cli::output::OutputFormat;
use crate::cli::{
    ConfigCommand, DeleteArgs, IdsArgs, NoteAddArgs, NoteEditArgs, NoteListArgs, ShowArgs,
    SnippetAddArgs, SnippetCommand, SnippetEditArgs, TodoAddArgs, TodoCommand, TodoEditArgs,
};
use crate::domain::{NewNote, NewSnippet, NewTodo, Priority};
use anyhow::bail;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// ===========================================
// Test doubles
// ===========================================

/// Editor that records the file it was given and overwrites it.
struct MockEditor {
    opened: RefCell<Option<PathBuf>>,
    replacement: Option<&'static str>,
    should_fail: bool,
}

impl MockEditor {
    fn writing(replacement: &'static str) -> Self {
        Self {
            opened: RefCell::new(None),
            replacement: Some(replacement),
            should_fail: false,
        }
    }

    fn untouched() -> Self {
        Self {
            opened: RefCell::new(None),
            replacement: None,
            should_fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            opened: RefCell::new(None),
            replacement: None,
            should_fail: true,
        }
    }

    fn opened_extension(&self) -> Option<String> {
        self.opened
            .borrow()
            .as_ref()
            .and_then(|p| p.extension())
            .map(|e| e.to_string_lossy().to_string())
    }
}

impl EditorLauncher for MockEditor {
    fn open(&self, path: &Path) -> Result<()> {
        *self.opened.borrow_mut() = Some(path.to_path_buf());
        if self.should_fail {
            bail!("editor failed to open");
        }
        if let Some(text) = self.replacement {
            fs::write(path, text)?;
        }
        Ok(())
    }
}

/// Answers every prompt the same way and counts how often it was asked.
struct FixedConfirm {
    answer: bool,
    asked: Cell<usize>,
}

impl FixedConfirm {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: Cell::new(0),
        }
    }
}

impl Confirm for FixedConfirm {
    fn confirm(&self, _question: &str) -> Result<bool> {
        self.asked.set(self.asked.get() + 1);
        Ok(self.answer)
    }
}

fn test_store() -> Store {
    Store::open_in_memory().unwrap()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

// ===========================================
// Shared utilities
// ===========================================

#[test]
fn parse_tags_joins_repeated_flags() {
    let tags = parse_tags(&strings(&["work, Calls", "work", "urgent"]));
    assert_eq!(tags.serialize(), "calls,urgent,work");
}

#[test]
fn replacement_tags_none_without_flags() {
    assert_eq!(replacement_tags(&[]), None);
    assert_eq!(replacement_tags(&strings(&[""])), Some(TagSet::new()));
}

#[test]
fn common_list_options_rejects_bad_date() {
    let args = ListCommonArgs {
        created: Some("last tuesday".into()),
        ..ListCommonArgs::default()
    };
    let err = common_list_options(&args).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_VALIDATION);
}

// ===========================================
// Notes
// ===========================================

#[test]
fn add_note_from_argument() {
    let store = test_store();
    let args = NoteAddArgs {
        content: Some("Remember to call John".into()),
        tags: strings(&["work,calls"]),
        title: Some("Call".into()),
        ..NoteAddArgs::default()
    };

    handle_add(&args, &store, &MockEditor::failing()).unwrap();

    let notes = store.notes().list(&ListOptions::new()).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content(), "Remember to call John");
    assert_eq!(notes[0].title(), Some("Call"));
    assert_eq!(notes[0].tags().serialize(), "calls,work");
}

#[test]
fn add_note_without_content_uses_editor() {
    let store = test_store();
    let editor = MockEditor::writing("# Draft\nwritten in editor\n");

    handle_add(&NoteAddArgs::default(), &store, &editor).unwrap();

    assert_eq!(editor.opened_extension().as_deref(), Some("md"));
    let note = store.notes().get(1).unwrap();
    assert_eq!(note.content(), "# Draft\nwritten in editor");
}

#[test]
fn add_note_with_empty_editor_result_is_validation_error() {
    let store = test_store();
    let err = handle_add(&NoteAddArgs::default(), &store, &MockEditor::untouched()).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_VALIDATION);
    assert_eq!(store.notes().count().unwrap(), 0);
}

#[test]
fn add_note_blank_argument_is_rejected() {
    let store = test_store();
    let args = NoteAddArgs {
        content: Some("   ".into()),
        ..NoteAddArgs::default()
    };
    let err = handle_add(&args, &store, &MockEditor::failing()).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_VALIDATION);
}

#[test]
fn list_rejects_zero_limit() {
    let store = test_store();
    let args = NoteListArgs {
        common: ListCommonArgs {
            limit: Some(0),
            ..ListCommonArgs::default()
        },
        starred: false,
    };
    let err = handle_list(&args, &store).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_VALIDATION);
}

#[test]
fn show_missing_note_is_not_found() {
    let store = test_store();
    let args = ShowArgs {
        id: 9999,
        format: OutputFormat::Json,
    };
    let err = handle_show(&args, &store).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_NOT_FOUND);
}

#[test]
fn edit_note_with_flags_skips_editor() {
    let store = test_store();
    let note = store.notes().create(NewNote::new("old").title("T")).unwrap();
    let args = NoteEditArgs {
        id: note.id(),
        content: Some("new".into()),
        ..NoteEditArgs::default()
    };
    let editor = MockEditor::failing();

    handle_edit(&args, &store, &editor).unwrap();

    assert!(editor.opened.borrow().is_none());
    let updated = store.notes().get(note.id()).unwrap();
    assert_eq!(updated.content(), "new");
    assert_eq!(updated.title(), Some("T"));
}

#[test]
fn edit_note_opens_editor_with_current_content() {
    let store = test_store();
    let note = store.notes().create(NewNote::new("before")).unwrap();
    let editor = MockEditor::writing("after\n");

    handle_edit(
        &NoteEditArgs {
            id: note.id(),
            ..NoteEditArgs::default()
        },
        &store,
        &editor,
    )
    .unwrap();

    assert_eq!(store.notes().get(note.id()).unwrap().content(), "after");
}

#[test]
fn edit_note_unchanged_in_editor_keeps_timestamp() {
    let store = test_store();
    let note = store.notes().create(NewNote::new("same")).unwrap();

    handle_edit(
        &NoteEditArgs {
            id: note.id(),
            ..NoteEditArgs::default()
        },
        &store,
        &MockEditor::untouched(),
    )
    .unwrap();

    assert_eq!(store.notes().get(note.id()).unwrap().updated_at(), note.updated_at());
}

#[test]
fn edit_note_editor_failure_propagates() {
    let store = test_store();
    let note = store.notes().create(NewNote::new("x")).unwrap();
    let result = handle_edit(
        &NoteEditArgs {
            id: note.id(),
            ..NoteEditArgs::default()
        },
        &store,
        &MockEditor::failing(),
    );
    assert!(result.is_err());
}

#[test]
fn star_and_unstar_note() {
    let store = test_store();
    let note = store.notes().create(NewNote::new("x")).unwrap();

    handle_star(note.id(), true, &store).unwrap();
    assert!(store.notes().get(note.id()).unwrap().is_starred());

    handle_star(note.id(), false, &store).unwrap();
    assert!(!store.notes().get(note.id()).unwrap().is_starred());
}

// ===========================================
// Delete flow
// ===========================================

#[test]
fn delete_asks_once_and_skips_missing() {
    let store = test_store();
    let a = store.notes().create(NewNote::new("a")).unwrap().id();
    let b = store.notes().create(NewNote::new("b")).unwrap().id();
    let prompt = FixedConfirm::new(true);

    delete_by_id(&store.notes(), &[a, 404, b, a], false, &prompt).unwrap();

    assert_eq!(prompt.asked.get(), 1);
    assert_eq!(store.notes().count().unwrap(), 0);
}

#[test]
fn deletion_listing_shows_each_record() {
    let store = test_store();
    store.notes().create(NewNote::new("first").title("Groceries")).unwrap();
    store.todos().create(NewTodo::new("Review PR")).unwrap();

    let notes = store.notes().list(&ListOptions::new()).unwrap();
    assert_eq!(deletion_listing(&notes), "  Note #1: Groceries\n");

    let todos = store.todos().list(&ListOptions::new()).unwrap();
    assert_eq!(deletion_listing(&todos), "  [ ] TODO #1: Review PR\n");
}

#[test]
fn delete_declined_keeps_records() {
    let store = test_store();
    let a = store.notes().create(NewNote::new("a")).unwrap().id();
    let prompt = FixedConfirm::new(false);

    delete_by_id(&store.notes(), &[a], false, &prompt).unwrap();

    assert_eq!(store.notes().count().unwrap(), 1);
}

#[test]
fn delete_force_does_not_prompt() {
    let store = test_store();
    let a = store.todos().create(NewTodo::new("a")).unwrap().id();
    let prompt = FixedConfirm::new(false);

    delete_by_id(&store.todos(), &[a], true, &prompt).unwrap();

    assert_eq!(prompt.asked.get(), 0);
    assert_eq!(store.todos().count().unwrap(), 0);
}

#[test]
fn delete_only_missing_ids_is_not_found() {
    let store = test_store();
    let prompt = FixedConfirm::new(true);
    let err = delete_by_id(&store.snippets(), &[7, 8], false, &prompt).unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_NOT_FOUND);
    assert_eq!(prompt.asked.get(), 0);
}

#[test]
fn run_store_command_routes_note_delete() {
    let store = test_store();
    let a = store.notes().create(NewNote::new("a")).unwrap().id();
    let command = Command::Delete(DeleteArgs {
        ids: vec![a],
        force: true,
    });

    run_store_command(&command, &store, &MockEditor::failing(), &FixedConfirm::new(false))
        .unwrap();

    assert_eq!(store.notes().find(a).unwrap(), None);
}

// ===========================================
// Snippets
// ===========================================

#[test]
fn snippet_from_file_detects_language() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("hello.py");
    fs::write(&path, "print('hello')\n").unwrap();
    let store = test_store();

    let command = SnippetCommand::Add(SnippetAddArgs {
        from_file: Some(path),
        ..SnippetAddArgs::default()
    });
    handle_snippet(&command, &store, &MockEditor::failing(), &FixedConfirm::new(true)).unwrap();

    let snippet = store.snippets().get(1).unwrap();
    assert_eq!(snippet.language(), Some("python"));
    assert_eq!(snippet.code(), "print('hello')\n");
}

#[test]
fn snippet_explicit_language_wins_over_detection() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("script.sh");
    fs::write(&path, "echo hi").unwrap();
    let store = test_store();

    let command = SnippetCommand::Add(SnippetAddArgs {
        from_file: Some(path),
        language: Some("zsh".into()),
        ..SnippetAddArgs::default()
    });
    handle_snippet(&command, &store, &MockEditor::failing(), &FixedConfirm::new(true)).unwrap();

    assert_eq!(store.snippets().get(1).unwrap().language(), Some("zsh"));
}

#[test]
fn snippet_editor_uses_language_extension() {
    let store = test_store();
    let editor = MockEditor::writing("fn main() {}\n");
    let command = SnippetCommand::Add(SnippetAddArgs {
        language: Some("rust".into()),
        ..SnippetAddArgs::default()
    });

    handle_snippet(&command, &store, &editor, &FixedConfirm::new(true)).unwrap();

    assert_eq!(editor.opened_extension().as_deref(), Some("rs"));
    assert_eq!(store.snippets().get(1).unwrap().code(), "fn main() {}");
}

#[test]
fn snippet_edit_clears_language() {
    let store = test_store();
    let snippet = store
        .snippets()
        .create(NewSnippet::new("ls -la").language("bash"))
        .unwrap();
    let command = SnippetCommand::Edit(SnippetEditArgs {
        id: snippet.id(),
        language: Some(String::new()),
        ..SnippetEditArgs::default()
    });

    handle_snippet(&command, &store, &MockEditor::failing(), &FixedConfirm::new(true)).unwrap();

    assert_eq!(store.snippets().get(snippet.id()).unwrap().language(), None);
}

// ===========================================
// Todos
// ===========================================

#[test]
fn todo_add_and_done() {
    let store = test_store();
    let prompt = FixedConfirm::new(true);
    let due = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();

    handle_todo(
        &TodoCommand::Add(TodoAddArgs {
            title: "Review PR".into(),
            priority: Priority::High,
            due: Some(due),
            ..TodoAddArgs::default()
        }),
        &store,
        &MockEditor::failing(),
        &prompt,
    )
    .unwrap();
    handle_todo(
        &TodoCommand::Done(IdsArgs { ids: vec![1] }),
        &store,
        &MockEditor::failing(),
        &prompt,
    )
    .unwrap();

    let todo = store.todos().get(1).unwrap();
    assert_eq!(todo.priority(), Priority::High);
    assert_eq!(todo.due_date(), Some(due));
    assert!(todo.is_completed());
}

#[test]
fn todo_done_missing_is_not_found() {
    let store = test_store();
    let err = handle_todo(
        &TodoCommand::Done(IdsArgs { ids: vec![42] }),
        &store,
        &MockEditor::failing(),
        &FixedConfirm::new(true),
    )
    .unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_NOT_FOUND);
}

#[test]
fn todo_edit_no_due_clears_date() {
    let store = test_store();
    let due = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    let todo = store.todos().create(NewTodo::new("pay").due_date(due)).unwrap();

    handle_todo(
        &TodoCommand::Edit(TodoEditArgs {
            id: todo.id(),
            no_due: true,
            ..TodoEditArgs::default()
        }),
        &store,
        &MockEditor::failing(),
        &FixedConfirm::new(true),
    )
    .unwrap();

    assert_eq!(store.todos().get(todo.id()).unwrap().due_date(), None);
}

#[test]
fn todo_edit_without_flags_edits_description() {
    let store = test_store();
    let todo = store
        .todos()
        .create(NewTodo::new("Review PR").description("check tests"))
        .unwrap();
    let editor = MockEditor::writing("check tests\nand docs\n");

    handle_todo(
        &TodoCommand::Edit(TodoEditArgs {
            id: todo.id(),
            ..TodoEditArgs::default()
        }),
        &store,
        &editor,
        &FixedConfirm::new(true),
    )
    .unwrap();

    assert_eq!(editor.opened_extension().as_deref(), Some("txt"));
    let updated = store.todos().get(todo.id()).unwrap();
    assert_eq!(updated.description(), Some("check tests\nand docs"));
    assert_eq!(updated.title(), "Review PR");
}

#[test]
fn todo_edit_untouched_editor_changes_nothing() {
    let store = test_store();
    let todo = store.todos().create(NewTodo::new("Plain")).unwrap();

    handle_todo(
        &TodoCommand::Edit(TodoEditArgs {
            id: todo.id(),
            ..TodoEditArgs::default()
        }),
        &store,
        &MockEditor::untouched(),
        &FixedConfirm::new(true),
    )
    .unwrap();

    assert_eq!(store.todos().get(todo.id()).unwrap(), todo);
}

#[test]
fn todo_edit_missing_skips_editor() {
    let store = test_store();
    let editor = MockEditor::writing("never written");
    let err = handle_todo(
        &TodoCommand::Edit(TodoEditArgs {
            id: 77,
            ..TodoEditArgs::default()
        }),
        &store,
        &editor,
        &FixedConfirm::new(true),
    )
    .unwrap_err();

    assert_eq!(crate::exit_code(&err), crate::EXIT_NOT_FOUND);
    assert!(editor.opened.borrow().is_none());
}

// ===========================================
// Config
// ===========================================

#[test]
fn config_set_get_and_reset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    handle_config(
        &ConfigCommand::Set {
            key: "editor".into(),
            value: "nvim".into(),
        },
        &path,
    )
    .unwrap();
    assert_eq!(Config::load_from(&path).unwrap().editor.as_deref(), Some("nvim"));

    handle_config(&ConfigCommand::Reset, &path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    let backup = config::backup_path(&path);
    assert_eq!(Config::load_from(&backup).unwrap().editor.as_deref(), Some("nvim"));
}

#[test]
fn config_set_unknown_key_is_validation_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let err = handle_config(
        &ConfigCommand::Set {
            key: "colour".into(),
            value: "red".into(),
        },
        &path,
    )
    .unwrap_err();
    assert_eq!(crate::exit_code(&err), crate::EXIT_VALIDATION);
    assert!(!path.exists());
}

