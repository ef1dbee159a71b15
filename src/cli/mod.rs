//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod cache;
pub mod context;
pub mod init;
pub mod instances;
pub mod show;
pub mod status;
pub mod users;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// cloudeff - rightsizing savings by employee and team
#[derive(Parser, Debug)]
#[command(name = "cloudeff")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "CLOUDEFF_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "CLOUDEFF_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Report snapshot (JSON) to load
    #[arg(long, global = true, env = "CLOUDEFF_BOOTSTRAP", hide_env = true)]
    pub bootstrap: Option<String>,

    /// Report server base URL
    #[arg(long, global = true, env = "CLOUDEFF_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "CLOUDEFF_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Reuse instance lists downloaded within the last hour
    #[arg(long, global = true, env = "CLOUDEFF_CACHE", hide_env = true)]
    pub cache: bool,
}

/// Selection shared by `show` and `instances`
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SelectionArgs {
    /// User to show (defaults to the snapshot's user, else leadership)
    #[arg(long, short = 'u')]
    pub user: Option<String>,

    /// Report page path or URL, e.g. /2018-10-01/allocation/alice.html
    #[arg(long, conflicts_with = "user")]
    pub page: Option<String>,

    /// Show only the snapshot's initial instances, skip the download
    #[arg(long)]
    pub offline: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize cloudeff configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Show savings for a user and their team, or for leadership
    #[command(after_help = "EXAMPLES:\n  \
            cloudeff show                                # Snapshot's user, else leadership\n  \
            cloudeff show --user jane_doe                # One user and their reports\n  \
            cloudeff show --page /2018-10-01/allocation/  # Leadership view from a page path\n  \
            cloudeff show --offline --format json        # No download, JSON output")]
    Show {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// List instances for a user (or all instances for leadership)
    Instances {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Maximum number of instances to list
        #[arg(long, short = 'l')]
        limit: Option<usize>,
    },

    /// List every user in the snapshot, highest team savings first
    Users {
        /// Only users reporting to this manager
        #[arg(long, short = 'm')]
        manager: Option<String>,
    },

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
  bash:   cloudeff completion bash > /etc/bash_completion.d/cloudeff
  zsh:    cloudeff completion zsh > \"${fpath[1]}/_cloudeff\"
  fish:   cloudeff completion fish > ~/.config/fish/completions/cloudeff.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,

    /// Clear cached downloads
    Clear {
        /// Only clear this reporting period
        #[arg(long)]
        period: Option<String>,
    },

    /// Print cache directory path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_show_parses_selection() {
        let cli = Cli::parse_from(["cloudeff", "show", "--user", "jane_doe", "--offline"]);
        match cli.command {
            Commands::Show { selection } => {
                assert_eq!(selection.user.as_deref(), Some("jane_doe"));
                assert!(selection.offline);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_user_and_page_conflict() {
        let result = Cli::try_parse_from([
            "cloudeff",
            "show",
            "--user",
            "a",
            "--page",
            "/p/allocation/b.html",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_format_is_pretty() {
        let cli = Cli::parse_from(["cloudeff", "status"]);
        assert_eq!(cli.format, OutputFormat::Pretty);
    }
}
