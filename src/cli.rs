// src/cli.rs
//! Command line surface: run the API server, export a resume file to PDF,
//! or validate a resume file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resumaker")]
#[command(about = "Resume builder: live preview, AI assist flows, PDF export")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides RESUMAKER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Export a resume file to a paginated A4 PDF
    Export {
        /// Resume data file (TOML)
        #[arg(long)]
        data: PathBuf,
        /// Output directory (overrides RESUMAKER_OUTPUT_DIR)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Sidebar background color, #RRGGBB
        #[arg(long)]
        sidebar_bg: Option<String>,
        /// Sidebar text color, #RRGGBB
        #[arg(long)]
        sidebar_text: Option<String>,
        /// Tag background color, #RRGGBB
        #[arg(long)]
        tag_bg: Option<String>,
        /// Tag text color, #RRGGBB
        #[arg(long)]
        tag_text: Option<String>,
    },
    /// Validate a resume file and report field errors
    Check {
        /// Resume data file (TOML)
        #[arg(long)]
        data: PathBuf,
    },
}
