//! Shell completion scripts.

use crate::cli::Cli;
use anyhow::{bail, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Write completions for `shell` (or the shell detected from `$SHELL`).
pub fn generate(shell: Option<Shell>, out: &mut dyn Write) -> Result<()> {
    let Some(shell) = shell.or_else(Shell::from_env) else {
        bail!("Could not detect the shell, pass one explicitly (bash, zsh, fish, ...)");
    };

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
    Ok(())
}
