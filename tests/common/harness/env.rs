//! Isolated test environment with temp directory.

use super::{TestNote, ZendownCommand};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary working directory.
///
/// Holds the notes file, an output directory and any templates a test
/// writes. Cleaned up on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the environment
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the directory exports are written to.
    pub fn out_dir(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Path of a config file that is never created.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes the notes as a JSON array and returns the file path.
    pub fn write_notes(&self, notes: &[TestNote]) -> PathBuf {
        let array = Value::Array(notes.iter().map(TestNote::to_json).collect());
        self.write_file("notes.json", &array.to_string())
    }

    /// Writes a file to the test environment and returns its path.
    ///
    /// Useful for templates, config files and malformed inputs.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Creates a ZendownCommand isolated from the user's config.
    pub fn cmd(&self) -> ZendownCommand {
        ZendownCommand::new().config(&self.config_path())
    }

    /// Lists the files in the output directory, sorted.
    pub fn output_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.out_dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
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
    fn test_env_writes_notes_array() {
        let env = TestEnv::new();
        let path = env.write_notes(&[TestNote::new(1, "A"), TestNote::new(2, "B")]);
        let notes = zendown::infra::read_notes(&path).unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_env_output_dir_starts_empty() {
        let env = TestEnv::new();
        assert!(env.output_files().is_empty());
    }
}
