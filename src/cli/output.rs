//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Plain file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Result of an export written to disk.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    /// File name of the export
    pub filename: String,
    /// Where the file was written
    pub path: String,
    pub content_type: &'static str,
    pub bytes: usize,
    /// Notes written (1 for single-note exports)
    pub succeeded: usize,
    /// Titles of skipped notes (bulk export only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

/// Prints an export summary in the requested format.
pub fn print_summary(format: OutputFormat, summary: &ExportSummary, human_message: &str) {
    match format {
        OutputFormat::Human => {
            println!("{human_message}");
            for title in &summary.failed {
                eprintln!("  skipped: {title}");
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&Output::new(summary)) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("error: failed to serialize output: {err}"),
        },
        OutputFormat::Paths => println!("{}", summary.path),
    }
}
