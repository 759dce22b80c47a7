//! `masbc completions <SHELL>`: print a completion script to stdout.

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};

pub fn run_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "masbc", &mut std::io::stdout());
    Ok(())
}
