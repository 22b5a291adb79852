//! Note export: Markdown, raw HTML and ZIP archives of Markdown.
//!
//! An [`Exporter`] is built once from [`ExportOptions`] and reused for every
//! call. It holds no mutable state.

mod archive;
pub mod template;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::Note;
use crate::infra::{archive_entry_name, export_filename};
use crate::render::{RenderError, RenderOptions, Renderer};
use archive::Archive;

pub use template::{RAW_HTML_TEMPLATE, render_raw_html};

/// Default archive file name prefix.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "zendown-notes";

/// Content type of Markdown exports.
pub const MARKDOWN_CONTENT_TYPE: &str = "text/markdown";
/// Content type of raw HTML exports.
pub const HTML_CONTENT_TYPE: &str = "text/html";
/// Content type of bulk exports.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Errors that can occur during export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A note's content could not be converted to Markdown.
    #[error("failed to convert note {note_id} ({title:?}) to markdown: {source}")]
    Conversion {
        note_id: i64,
        title: String,
        #[source]
        source: RenderError,
    },

    /// Bulk export was called without any notes.
    #[error("no notes to export")]
    NoContent,

    /// A converted note could not be added to the archive.
    #[error("failed to add {title:?} to the archive: {source}")]
    ArchiveEntry {
        title: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// The archive could not be finalized.
    #[error("failed to finalize the archive: {0}")]
    ArchiveFinalize(#[source] zip::result::ZipError),

    /// The HTML template failed to render.
    #[error("failed to render HTML template: {0}")]
    Template(#[from] minijinja::Error),
}

/// Settings shared by every export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Archive names are `{archive_prefix}-{YYYY-MM-DD}.zip`.
    pub archive_prefix: String,
    /// Replaces [`RAW_HTML_TEMPLATE`] for raw HTML exports.
    pub html_template: Option<String>,
    /// Options for the Markdown renderer.
    pub render: RenderOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
            html_template: None,
            render: RenderOptions::default(),
        }
    }
}

/// A finished export, ready to be written or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Outcome of a bulk export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkExportReport {
    /// Notes written to the archive.
    pub succeeded: usize,
    /// Titles of notes that were skipped, in input order.
    pub failed: Vec<String>,
}

/// A bulk export archive and its report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkExport {
    pub file: ExportedFile,
    pub report: BulkExportReport,
}

/// Exports notes using one renderer and one set of options.
#[derive(Debug, Clone)]
pub struct Exporter {
    renderer: Renderer,
    options: ExportOptions,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportOptions::default())
    }
}

impl Exporter {
    /// Creates an exporter with the default rule set.
    pub fn new(options: ExportOptions) -> Self {
        let renderer = Renderer::builder()
            .with_default_rules()
            .options(options.render)
            .build();
        Self { renderer, options }
    }

    /// Creates an exporter around a custom renderer.
    ///
    /// The renderer's own options apply; `options.render` is ignored.
    pub fn with_renderer(renderer: Renderer, options: ExportOptions) -> Self {
        Self { renderer, options }
    }

    /// Returns the export options.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Converts a note to Markdown with its title as the first heading.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Conversion` if the note's HTML cannot be
    /// rendered (nesting past the configured limit).
    pub fn export_markdown(&self, note: &Note) -> Result<ExportedFile, ExportError> {
        let markdown = self.to_markdown(note)?;
        Ok(ExportedFile {
            filename: export_filename(note.title(), "md"),
            content_type: MARKDOWN_CONTENT_TYPE,
            bytes: markdown.into_bytes(),
        })
    }

    /// Wraps a note's HTML, untouched, in a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Only a broken custom template can fail, with `ExportError::Template`.
    pub fn export_raw_html(&self, note: &Note) -> Result<ExportedFile, ExportError> {
        let html = render_raw_html(
            self.options.html_template.as_deref(),
            note.title(),
            note.content(),
        )?;
        Ok(ExportedFile {
            filename: export_filename(note.title(), "html"),
            content_type: HTML_CONTENT_TYPE,
            bytes: html.into_bytes(),
        })
    }

    /// Exports every note as Markdown into one ZIP archive dated today
    /// (local time).
    ///
    /// See [`Exporter::export_all_as_zip_on`].
    pub fn export_all_as_zip(&self, notes: &[Note]) -> Result<BulkExport, ExportError> {
        self.export_all_as_zip_on(notes, Local::now().date_naive())
    }

    /// Exports every note as Markdown into one ZIP archive named for `date`.
    ///
    /// Entries are named `{sanitized-title}-{id}.md`. A note that fails to
    /// convert, or whose entry cannot be written, is skipped and its title
    /// recorded in the report; the rest of the batch continues.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::NoContent` if `notes` is empty.
    /// Returns `ExportError::ArchiveFinalize` if the archive cannot be
    /// completed; no partial archive is returned.
    pub fn export_all_as_zip_on(
        &self,
        notes: &[Note],
        date: NaiveDate,
    ) -> Result<BulkExport, ExportError> {
        if notes.is_empty() {
            return Err(ExportError::NoContent);
        }

        let mut archive = Archive::new();
        let mut report = BulkExportReport::default();

        for note in notes {
            match self.add_to_archive(&mut archive, note) {
                Ok(()) => report.succeeded += 1,
                Err(err) => {
                    warn!(note_id = note.id(), error = %err, "skipping note in bulk export");
                    report.failed.push(note.title().to_string());
                }
            }
        }

        let bytes = archive.finish().map_err(ExportError::ArchiveFinalize)?;

        info!(
            succeeded = report.succeeded,
            failed = report.failed.len(),
            "bulk export completed"
        );
        if !report.failed.is_empty() {
            info!(failed = ?report.failed, "notes skipped in bulk export");
        }

        Ok(BulkExport {
            file: ExportedFile {
                filename: format!("{}-{}.zip", self.options.archive_prefix, date.format("%Y-%m-%d")),
                content_type: ZIP_CONTENT_TYPE,
                bytes,
            },
            report,
        })
    }

    fn add_to_archive(&self, archive: &mut Archive, note: &Note) -> Result<(), ExportError> {
        let markdown = self.to_markdown(note)?;
        let name = archive_entry_name(note.title(), note.id());
        archive
            .add(&name, note.updated_at(), markdown.as_bytes())
            .map_err(|source| ExportError::ArchiveEntry {
                title: note.title().to_string(),
                source,
            })?;
        debug!(entries = archive.len(), entry = %name, "added note to archive");
        Ok(())
    }

    fn to_markdown(&self, note: &Note) -> Result<String, ExportError> {
        let body = self
            .renderer
            .render_html(note.content())
            .map_err(|source| ExportError::Conversion {
                note_id: note.id(),
                title: note.title().to_string(),
                source,
            })?;
        debug!(note_id = note.id(), bytes = body.len(), "rendered note");
        Ok(format!("# {}\n\n{}", note.title(), body))
    }
}
