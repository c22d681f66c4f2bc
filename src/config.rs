use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_TARGET: &str = "non-react-index.html";

#[derive(Debug, Parser)]
#[command(
    name = "inject-secrets",
    version,
    about = "Replace {{PLACEHOLDER}} tokens in a built HTML file with values from the environment."
)]
pub struct Cli {
    /// File to rewrite in place.
    #[arg(long, env = "INJECT_SECRETS_FILE", default_value = DEFAULT_TARGET)]
    pub file: PathBuf,

    /// Print the substituted content to stdout instead of rewriting the file.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub target: PathBuf,
    pub mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Write,
    DryRun,
}

impl Config {
    pub fn from_cli() -> Self {
        Config::from_args(Cli::parse())
    }

    pub fn from_args(cli: Cli) -> Self {
        let mode = if cli.dry_run { Mode::DryRun } else { Mode::Write };
        Self {
            target: cli.file,
            mode,
        }
    }
}
