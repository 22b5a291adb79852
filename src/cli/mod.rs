//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use output::OutputFormat;

/// zendown - export rich-text notes to Markdown, HTML and ZIP archives
#[derive(Parser, Debug)]
#[command(name = "zendown", version, about, long_about = None)]
pub struct Cli {
    /// Maximum HTML element nesting (overrides config file)
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export one note as Markdown
    Markdown(MarkdownArgs),

    /// Export one note as a standalone HTML document
    Html(HtmlArgs),

    /// Export every note as Markdown into a ZIP archive
    Archive(ArchiveArgs),
}

/// Arguments for the `markdown` command
#[derive(Parser, Debug)]
pub struct MarkdownArgs {
    /// JSON file holding one note or an array of notes
    pub notes: PathBuf,

    /// Id of the note to export
    #[arg(short, long)]
    pub id: i64,

    /// Directory to write the file into (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for the export summary (json and paths need --output)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `html` command
#[derive(Parser, Debug)]
pub struct HtmlArgs {
    /// JSON file holding one note or an array of notes
    pub notes: PathBuf,

    /// Id of the note to export
    #[arg(short, long)]
    pub id: i64,

    /// Directory to write the file into (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Custom document template (overrides config file)
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Output format for the export summary (json and paths need --output)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `archive` command
#[derive(Parser, Debug)]
pub struct ArchiveArgs {
    /// JSON file holding one note or an array of notes
    pub notes: PathBuf,

    /// Directory to write the archive into (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}
