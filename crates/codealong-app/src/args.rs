use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "codealong",
    version,
    about = "Compose HTML/CSS/JS sources into a sandboxed live preview"
)]
pub struct Args {
    /// Markup source file
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Stylesheet source file
    #[arg(long, value_name = "FILE")]
    pub css: Option<PathBuf>,

    /// Script source file
    #[arg(long, value_name = "FILE")]
    pub js: Option<PathBuf>,

    /// Preview output file (repeatable); every file receives the same page
    #[arg(long = "out", value_name = "FILE", required = true)]
    pub outputs: Vec<PathBuf>,

    /// Settings file to read instead of the platform default
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Override preview.debounce_ms from settings
    #[arg(long, value_name = "MS")]
    pub debounce_ms: Option<u64>,

    /// Render once and exit instead of watching the sources
    #[arg(long, default_value_t = false)]
    pub once: bool,
}
