//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `zendown` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct ZendownCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
}

impl ZendownCommand {
    /// Creates a new command for the `zendown` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
        }
    }

    /// Points `ZENDOWN_CONFIG` at `path`.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("zendown").expect("Failed to find zendown binary");
        cmd.args(&self.args).env_remove("RUST_LOG");
        if let Some(config) = &self.config {
            cmd.env("ZENDOWN_CONFIG", config);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `markdown` command.
    pub fn markdown(self, notes: &Path, id: i64) -> Self {
        self.args(["markdown", &notes.to_string_lossy(), "--id", &id.to_string()])
    }

    /// Configures for the `html` command.
    pub fn html(self, notes: &Path, id: i64) -> Self {
        self.args(["html", &notes.to_string_lossy(), "--id", &id.to_string()])
    }

    /// Configures for the `archive` command.
    pub fn archive(self, notes: &Path) -> Self {
        self.args(["archive", &notes.to_string_lossy()])
    }

    /// Adds `--output <dir>`.
    pub fn output(self, dir: &Path) -> Self {
        self.args(["--output", &dir.to_string_lossy()])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }

    /// Adds `--format paths` to the command.
    pub fn format_paths(self) -> Self {
        self.args(["--format", "paths"])
    }
}

impl Default for ZendownCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        ZendownCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = ZendownCommand::new()
            .markdown(Path::new("notes.json"), 3)
            .format_json();
        assert_eq!(
            cmd.get_args(),
            ["markdown", "notes.json", "--id", "3", "--format", "json"]
        );
    }
}
