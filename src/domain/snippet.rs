//! Code snippets.

use crate::domain::TagSet;
use crate::domain::validation::{ValidationError, optional_text, require_body};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A stored code snippet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) code: String,
    pub(crate) language: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tags: TagSet,
    pub(crate) starred: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Snippet {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn is_starred(&self) -> bool {
        self.starred
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Title if present, otherwise "<language> snippet".
    pub fn headline(&self) -> String {
        match (&self.title, &self.language) {
            (Some(title), _) => title.clone(),
            (None, Some(lang)) => format!("{} snippet", lang),
            (None, None) => "code snippet".to_string(),
        }
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Snippet #{}: {}", self.id, self.headline())
    }
}

/// Input for creating a snippet.
#[derive(Debug, Clone, Default)]
pub struct NewSnippet {
    pub(crate) code: String,
    pub(crate) language: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tags: TagSet,
    pub(crate) starred: bool,
}

impl NewSnippet {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = starred;
        self
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            code: require_body("snippet code", self.code)?,
            language: optional_text(self.language),
            title: optional_text(self.title),
            description: optional_text(self.description),
            tags: self.tags,
            starred: self.starred,
        })
    }
}

/// A partial update to a snippet.
///
/// Empty strings for language, title or description clear those fields.
#[derive(Debug, Clone, Default)]
pub struct SnippetPatch {
    pub(crate) code: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) tags: Option<TagSet>,
    pub(crate) starred: Option<bool>,
}

impl SnippetPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tags(mut self, tags: TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn starred(mut self, starred: bool) -> Self {
        self.starred = Some(starred);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.language.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.starred.is_none()
    }

    pub fn validated(self) -> Result<Self, ValidationError> {
        let code = self
            .code
            .map(|c| require_body("snippet code", c))
            .transpose()?;
        Ok(Self { code, ..self })
    }
}

/// Guesses a snippet language from a file name's extension.
///
/// Returns `None` for unknown or missing extensions.
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let lang = match ext.as_str() {
        "py" => "python",
        "js" | "mjs" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "cpp" | "cc" | "cxx" | "hpp" => "cpp",
        "c" | "h" => "c",
        "go" => "go",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "sh" | "bash" => "bash",
        "sql" => "sql",
        "html" | "htm" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "md" => "markdown",
        _ => return None,
    };
    Some(lang)
}

/// File extension used when a snippet of this language is opened in an editor.
pub fn editor_extension(language: Option<&str>) -> &'static str {
    match language.map(str::to_lowercase).as_deref() {
        Some("python") => ".py",
        Some("javascript") => ".js",
        Some("typescript") => ".ts",
        Some("java") => ".java",
        Some("cpp") => ".cpp",
        Some("c") => ".c",
        Some("go") => ".go",
        Some("rust") => ".rs",
        Some("ruby") => ".rb",
        Some("php") => ".php",
        Some("bash") | Some("shell") | Some("sh") => ".sh",
        Some("sql") => ".sql",
        Some("html") => ".html",
        Some("css") => ".css",
        Some("json") => ".json",
        Some("yaml") => ".yaml",
        _ => ".txt",
    }
}
