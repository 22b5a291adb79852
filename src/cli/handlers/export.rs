//! Handlers for the `markdown`, `html` and `archive` commands.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::cli::config::Config;
use crate::cli::output::{ExportSummary, OutputFormat, print_summary};
use crate::cli::{ArchiveArgs, Cli, HtmlArgs, MarkdownArgs};
use crate::domain::Note;
use crate::export::ExportedFile;
use crate::infra::write_export;

use super::{build_exporter, find_note, load_notes};

/// Handle the `markdown` command.
pub fn handle_markdown(cli: &Cli, args: &MarkdownArgs, config: &Config) -> Result<()> {
    check_stdout_format(args.output.as_deref(), args.format)?;
    let notes = load_notes(&args.notes)?;
    let note = find_note(&notes, args.id)?;
    let exporter = build_exporter(cli, config, None)?;

    let file = exporter.export_markdown(note)?;
    deliver_single(note, file, args.output.as_deref(), args.format)
}

/// Handle the `html` command.
pub fn handle_html(cli: &Cli, args: &HtmlArgs, config: &Config) -> Result<()> {
    check_stdout_format(args.output.as_deref(), args.format)?;
    let notes = load_notes(&args.notes)?;
    let note = find_note(&notes, args.id)?;
    let template = config.html_template(args.template.as_ref());
    let exporter = build_exporter(cli, config, template.as_deref())?;

    let file = exporter.export_raw_html(note)?;
    deliver_single(note, file, args.output.as_deref(), args.format)
}

/// Handle the `archive` command.
pub fn handle_archive(cli: &Cli, args: &ArchiveArgs, config: &Config) -> Result<()> {
    let notes = load_notes(&args.notes)?;
    let exporter = build_exporter(cli, config, None)?;
    let output_dir = config.output_dir(args.output.as_ref());

    let export = exporter.export_all_as_zip(&notes)?;
    let path = write_file(&output_dir, &export.file)?;

    let mut message = format!(
        "Exported {} {} to {}",
        export.report.succeeded,
        if export.report.succeeded == 1 { "note" } else { "notes" },
        path.display()
    );
    if !export.report.failed.is_empty() {
        message.push_str(&format!(" ({} failed)", export.report.failed.len()));
    }

    let summary = ExportSummary {
        filename: export.file.filename,
        path: path.display().to_string(),
        content_type: export.file.content_type,
        bytes: export.file.bytes.len(),
        succeeded: export.report.succeeded,
        failed: export.report.failed,
    };
    print_summary(args.format, &summary, &message);
    Ok(())
}

/// A document printed to stdout has no summary to format.
fn check_stdout_format(output: Option<&Path>, format: OutputFormat) -> Result<()> {
    let flag = match format {
        OutputFormat::Human => return Ok(()),
        OutputFormat::Json => "json",
        OutputFormat::Paths => "paths",
    };
    if output.is_none() {
        bail!("--format {flag} requires --output");
    }
    Ok(())
}

/// Writes a single-note export into `output`, or prints it to stdout.
fn deliver_single(
    note: &Note,
    file: ExportedFile,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let Some(dir) = output else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(&file.bytes)
            .context("failed to write export to stdout")?;
        return Ok(());
    };

    let path = write_file(dir, &file)?;
    let summary = ExportSummary {
        filename: file.filename,
        path: path.display().to_string(),
        content_type: file.content_type,
        bytes: file.bytes.len(),
        succeeded: 1,
        failed: Vec::new(),
    };
    print_summary(
        format,
        &summary,
        &format!("Exported '{}' to {}", note.title(), path.display()),
    );
    Ok(())
}

fn write_file(dir: &Path, file: &ExportedFile) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    Ok(write_export(dir, &file.filename, &file.bytes)?)
}
