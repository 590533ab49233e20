//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::QnoteCommand;
use qnote::store::Store;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated environment holding a database and config file in a temp dir.
///
/// Everything is removed when the `TestEnv` is dropped.
pub struct TestEnv {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Database file used by every command from [`TestEnv::cmd`].
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("qnote.db")
    }

    /// Config file passed to the binary through `QNOTE_CONFIG`.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config").join("config.yaml")
    }

    /// Opens the environment's database directly, for seeding and inspection.
    pub fn store(&self) -> Store {
        Store::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Creates a command bound to this environment's database and config.
    pub fn cmd(&self) -> QnoteCommand {
        QnoteCommand::new()
            .db(&self.db_path())
            .env("QNOTE_CONFIG", &self.config_path().to_string_lossy())
    }

    /// Writes a file under the environment root and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_paths_live_under_root() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.root()));
        assert!(env.config_path().starts_with(env.root()));
    }

    #[test]
    fn test_env_store_creates_database() {
        let env = TestEnv::new();
        let _store = env.store();
        assert!(env.db_path().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
    }
}
