use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0\ndev: abc1234 2026-01-15"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("AIDE_GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("AIDE_COMMIT_DATE");
    const IS_RELEASE: &str = env!("AIDE_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "aide",
    bin_name = "aide",
    version = get_version(),
    disable_help_subcommand = true,
    after_help = "Run `aide commands` to see every keyword.\n\nEnable shell completions:\n  eval \"$(aide completions bash)\"  # add to ~/.bashrc\n  eval \"$(aide completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Personal assistant for the terminal: contacts, birthdays and notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (beats AIDE_DATA_DIR and aide.toml)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Log at debug level
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Address book: add, change, remove, show, search, birthdays
    #[command(alias = "contact", display_order = 1)]
    Contacts {
        /// Command keyword, e.g. add, show, birthdays
        keyword: String,

        /// Arguments for the keyword
        args: Vec<String>,
    },

    /// Notebook: add, change, remove, show, search, tagged
    #[command(alias = "note", display_order = 2)]
    Notes {
        /// Command keyword, e.g. add, show, tagged
        keyword: String,

        /// Arguments for the keyword
        args: Vec<String>,
    },

    /// List every keyword with its aliases and usage
    #[command(name = "commands", display_order = 3)]
    Catalog,

    /// Show the resolved configuration
    #[command(display_order = 4)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },

    /// Print a shell completion script
    #[command(display_order = 5)]
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a commented sample aide.toml
    Template,
}

/// Builds the clap Command, used for completion script generation.
pub fn build_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn feature_commands_collect_args() {
        let cli = Cli::parse_from([
            "aide",
            "--data",
            "/tmp/x",
            "contacts",
            "add",
            "contact",
            "Ann Lee",
            "0501234567",
        ]);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Commands::Contacts { keyword, args } => {
                assert_eq!(keyword, "add");
                assert_eq!(args, vec!["contact", "Ann Lee", "0501234567"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn singular_aliases_and_trailing_flags() {
        let cli = Cli::parse_from(["aide", "note", "show", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Notes { ref keyword, .. } if keyword == "show"));
    }
}
