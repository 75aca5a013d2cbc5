mod cli;
mod config;
mod errors;
mod form;
mod layout;
mod models;
mod render;
mod serializer;

#[cfg(test)]
mod fixtures;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::errors::AppError;
use crate::form::{ResumeDraft, Session, Snapshot};
use crate::layout::{analyze_page_fill, paginate, project};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(log_filter(cli.verbose, &config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting harvard-cv v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli.command, &config) {
        if let Some(app) = e.downcast_ref::<AppError>() {
            error!(code = app.code(), "{e:#}");
        }
        return Err(e);
    }
    Ok(())
}

/// `--verbose` always wins over `RUST_LOG`, including one loaded from `.env`.
fn log_filter(verbose: bool, rust_log: &str) -> EnvFilter {
    if verbose {
        return EnvFilter::new("harvard_cv=debug");
    }
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("harvard_cv={rust_log}")))
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::New { output } => {
            let path = config.output_path(output, "data.json");
            let draft = ResumeDraft::new();
            serializer::export_file(draft.document(), &path)
                .with_context(|| format!("Failed to write template to {}", path.display()))?;
            println!("{}", path.display());
        }

        Command::Validate { input } => {
            let text = read_input(&input)?;
            let doc = serializer::parse_document(&text)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            match form::validate(&doc) {
                Ok(()) => println!("{} is valid", input.display()),
                Err(errors) => {
                    for field in &errors.errors {
                        eprintln!("{}: {}", field.path, field.message);
                    }
                    return Err(AppError::Validation(errors))
                        .with_context(|| format!("{} is not valid", input.display()));
                }
            }
        }

        Command::Preview { input, output } => {
            let snapshot = load_snapshot(&input)?;
            let projected = project(snapshot.document()).map_err(AppError::from)?;
            let html = render::PreviewRenderer::new()
                .and_then(|renderer| renderer.render(&projected))
                .map_err(AppError::from)?;

            let path = config.output_path(output, "cv.html");
            serializer::write_atomic(&path, html.as_bytes())
                .with_context(|| format!("Failed to write preview to {}", path.display()))?;
            info!("Preview written to {}", path.display());
            println!("{}", path.display());
        }

        Command::Pdf { input, output } => {
            let snapshot = load_snapshot(&input)?;
            let projected = project(snapshot.document()).map_err(AppError::from)?;
            let paginated = paginate(&projected, &config.page_config());

            let fill = analyze_page_fill(&paginated);
            if fill.is_single_page() {
                info!(fill = fill.last_page_fill, "CV fits on one page");
            } else {
                warn!(pages = fill.page_count, "CV does not fit on a single page");
            }

            let bytes = render::render_pdf(&paginated).map_err(AppError::from)?;
            let path = config.output_path(output, "cv.pdf");
            serializer::write_atomic(&path, &bytes)
                .with_context(|| format!("Failed to write PDF to {}", path.display()))?;
            info!("PDF written to {}", path.display());
            println!("{}", path.display());
        }

        Command::Export { input, output } => {
            let doc = serializer::import_file(&input)
                .with_context(|| format!("Failed to import {}", input.display()))?;
            let path = config.output_path(output, "data.json");
            serializer::export_file(&doc, &path)
                .with_context(|| format!("Failed to export to {}", path.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(AppError::from)
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Imports `path` through a form session, the same path the UI takes.
fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = read_input(path)?;
    let mut session = Session::new();
    let snapshot = session
        .import(&text)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(snapshot.clone())
}
