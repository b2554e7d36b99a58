//! Shell completion scripts via `clap_complete`.

use super::setup::{build_command, CompletionShell};
use clap_complete::{generate, Shell};
use std::io::Write;

pub fn write_completions(shell: CompletionShell, out: &mut dyn Write) {
    let shell = match shell {
        CompletionShell::Bash => Shell::Bash,
        CompletionShell::Zsh => Shell::Zsh,
        CompletionShell::Fish => Shell::Fish,
    };
    let mut cmd = build_command();
    generate(shell, &mut cmd, "aide", out);
}
