//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence for each setting is CLI flag > environment variable > config
/// file > default. This struct holds the flag/env layer; the config layer is
/// applied in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.cloudeff/config.yaml)
    pub config: Option<String>,

    /// Report snapshot path (overrides config)
    pub bootstrap: Option<String>,

    /// Report server base URL (overrides config)
    pub api_host: Option<String>,

    /// Serve repeat downloads from the response cache
    pub cache: bool,
}

impl GlobalOptions {
    /// Build from the parsed CLI, once, in main.rs
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            bootstrap: cli.bootstrap.clone(),
            api_host: cli.api_host.clone(),
            cache: cli.cache,
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn bootstrap_ref(&self) -> Option<&str> {
        self.bootstrap.as_deref()
    }

    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "cloudeff",
            "--format",
            "json",
            "--config",
            "/tmp/c.yaml",
            "--api-host",
            "http://localhost:9000",
            "--cache",
            "version",
        ]);
        let opts = GlobalOptions::from_cli(&cli);

        assert_eq!(opts.format, OutputFormat::Json);
        assert_eq!(opts.config_ref(), Some("/tmp/c.yaml"));
        assert_eq!(opts.api_host_ref(), Some("http://localhost:9000"));
        assert_eq!(opts.bootstrap_ref(), None);
        assert!(opts.cache);
    }
}
