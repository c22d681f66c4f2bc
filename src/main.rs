use std::io::{self, Write};

use anyhow::{Context, Result};
use inject_secrets::Config;
use inject_secrets::config::Mode;
use inject_secrets::placeholder::env_lookup;
use inject_secrets::{inject_file, render_file};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_cli();
    match config.mode {
        Mode::Write => {
            inject_file(&config.target, env_lookup)?;
            Ok(())
        }
        Mode::DryRun => dry_run(&config),
    }
}

fn dry_run(config: &Config) -> Result<()> {
    let substitution = render_file(&config.target, env_lookup)?;
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(substitution.content.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write substituted content to stdout")
}
