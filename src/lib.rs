//! zendown - export rich-text notes to Markdown, HTML and ZIP archives

pub mod cli;
pub mod domain;
pub mod export;
pub mod html;
pub mod infra;
pub mod logging;
pub mod render;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_archive, handle_html, handle_markdown},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match &cli.command {
        Command::Markdown(args) => handle_markdown(&cli, args, &config),
        Command::Html(args) => handle_html(&cli, args, &config),
        Command::Archive(args) => handle_archive(&cli, args, &config),
    }
}
