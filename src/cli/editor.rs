//! External editor integration.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use std::process::Command;

/// Trait for launching an editor (allows mocking in tests).
pub trait EditorLauncher {
    /// Opens `path` and returns once the editor exits.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Runs the configured editor command.
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl EditorLauncher for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        open_in_editor(path, &self.command)
    }
}

/// Runs `editor` on `path`. The command may carry arguments ("code --wait").
pub fn open_in_editor(path: &Path, editor: &str) -> Result<()> {
    let parts: Vec<&str> = editor.split_whitespace().collect();
    let Some((cmd, args)) = parts.split_first() else {
        bail!("editor command is empty");
    };

    log::debug!("launching editor '{}' on {}", editor, path.display());
    let status = Command::new(cmd)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

/// Lets the user edit `initial` in a temporary file ending in `extension`.
///
/// Returns `None` when the result is blank or unchanged.
pub fn compose<E: EditorLauncher + ?Sized>(
    editor: &E,
    initial: &str,
    extension: &str,
) -> Result<Option<String>> {
    let file = tempfile::Builder::new()
        .prefix("qnote-")
        .suffix(extension)
        .tempfile()
        .context("failed to create temporary file for editing")?;
    fs::write(file.path(), initial)
        .with_context(|| format!("failed to write {}", file.path().display()))?;

    editor.open(file.path())?;

    let edited = fs::read_to_string(file.path())
        .with_context(|| format!("failed to read {}", file.path().display()))?;
    let edited = edited.trim_end_matches(['\n', '\r']);
    if edited.trim().is_empty() || edited == initial.trim_end_matches(['\n', '\r']) {
        return Ok(None);
    }
    Ok(Some(edited.to_string()))
}
