use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "harvard-cv")]
#[command(about = "Build a Harvard-style CV from a JSON document", version)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a blank document to fill in
    New {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a document and list every problem found
    Validate { input: PathBuf },
    /// Render the printable HTML preview
    Preview {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render an A4 PDF
    Pdf {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-export a valid document as normalized JSON
    Export {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
