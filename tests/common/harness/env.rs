//! Isolated test environment with temp directory.

// Not every test binary uses every helper.
#![allow(dead_code)]

use super::MetricsCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary vault.
///
/// The vault and an empty config directory live side by side in one temp
/// directory that is cleaned up on drop, so a user's own config file never
/// leaks into a test run.
pub struct TestEnv {
    _temp_dir: TempDir,
    notes_dir: PathBuf,
    config_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new environment with an empty vault.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let notes_dir = temp_dir.path().join("vault");
        let config_dir = temp_dir.path().join("config");
        std::fs::create_dir_all(&notes_dir).expect("Failed to create vault directory");
        std::fs::create_dir_all(&config_dir).expect("Failed to create config directory");
        Self {
            _temp_dir: temp_dir,
            notes_dir,
            config_dir,
        }
    }

    /// Returns the path to the vault.
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Returns the directory used as `XDG_CONFIG_HOME` for commands.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns where the report is written by default.
    pub fn report_path(&self) -> PathBuf {
        self.notes_dir.join("metrics.json")
    }

    /// Writes a note at a vault-relative path, creating parent directories.
    pub fn add_note(&self, relative: &str, text: &str) -> PathBuf {
        self.write_bytes(relative, text.as_bytes())
    }

    /// Writes raw bytes at a vault-relative path.
    pub fn write_bytes(&self, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = self.notes_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, bytes).expect("Failed to write file");
        path
    }

    /// Writes the vault-metrics config file.
    pub fn write_config(&self, toml: &str) -> PathBuf {
        let dir = self.config_dir.join("vault-metrics");
        std::fs::create_dir_all(&dir).expect("Failed to create config directory");
        let path = dir.join("config.toml");
        std::fs::write(&path, toml).expect("Failed to write config");
        path
    }

    /// Reads and parses the default report file.
    pub fn read_report(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.report_path()).expect("Failed to read report");
        serde_json::from_str(&content).expect("Report is not valid JSON")
    }

    /// Creates a command configured for this vault.
    pub fn cmd(&self) -> MetricsCommand {
        MetricsCommand::new()
            .config_home(&self.config_dir)
            .dir(&self.notes_dir)
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
    fn test_env_creates_vault() {
        let env = TestEnv::new();
        assert!(env.notes_dir().is_dir());
        assert!(env.config_dir().is_dir());
        assert!(!env.notes_dir().starts_with(env.config_dir()));
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.notes_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_add_note_creates_nested_file() {
        let env = TestEnv::new();
        let path = env.add_note("dir/sub/note.md", "# Hi");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hi");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--dir");
        assert_eq!(args[1], env.notes_dir().to_string_lossy());
    }
}
