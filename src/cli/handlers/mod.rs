//! Command handlers for the CLI.

mod export;

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::Cli;
use crate::cli::config::Config;
use crate::domain::Note;
use crate::export::{ExportOptions, Exporter};
use crate::infra::read_notes;
use crate::render::RenderOptions;

pub use export::{handle_archive, handle_html, handle_markdown};

// ===========================================
// Shared Utilities
// ===========================================

/// Reads the notes file given on the command line.
pub(crate) fn load_notes(path: &Path) -> Result<Vec<Note>> {
    read_notes(path).with_context(|| format!("failed to load notes from {}", path.display()))
}

/// Finds a note by id.
pub(crate) fn find_note(notes: &[Note], id: i64) -> Result<&Note> {
    match notes.iter().find(|note| note.id() == id) {
        Some(note) => Ok(note),
        None => bail!("Note not found: {}", id),
    }
}

/// Builds the exporter from config and global flags.
///
/// `template` is the template path already resolved against the config; its
/// contents are read here.
pub(crate) fn build_exporter(
    cli: &Cli,
    config: &Config,
    template: Option<&Path>,
) -> Result<Exporter> {
    let html_template = match template {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template: {}", path.display()))?,
        ),
        None => None,
    };

    Ok(Exporter::new(ExportOptions {
        archive_prefix: config.archive_prefix().to_string(),
        html_template,
        render: RenderOptions {
            max_depth: config.max_depth(cli.max_depth),
        },
    }))
}
