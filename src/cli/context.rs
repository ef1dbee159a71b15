//! Command execution context
//!
//! Loads configuration and the report snapshot once, and hands commands an
//! explicit context instead of ambient globals.

use std::sync::Arc;

use crate::analytics::Analytics;
use crate::bootstrap::Bootstrap;
use crate::cache::CachedAllocationClient;
use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::ReportClient;
use crate::config::Config;
use crate::error::Result;

/// Report client with response caching
pub type Client = Arc<CachedAllocationClient<ReportClient>>;

/// Shared state for report commands.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Report snapshot for the period being viewed
    pub snapshot: Bootstrap,
    /// Output format preference
    pub format: OutputFormat,
    /// Usage event recorder
    pub analytics: Analytics,
    cache: bool,
}

impl CommandContext {
    /// Load config and snapshot.
    ///
    /// The snapshot path comes from `--bootstrap`, else `bootstrap_path` in
    /// config. `--api-host` replaces the configured host, which is only
    /// required once [`CommandContext::client`] is called.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        if let Some(host) = opts.api_host_ref() {
            config.api_host = Some(host.to_string());
        }

        let snapshot_path = opts
            .bootstrap_ref()
            .or(config.bootstrap_path.as_deref());
        let snapshot = Bootstrap::load_at(snapshot_path)?;

        let analytics = Analytics::from_log_path(config.analytics_log.as_deref());
        analytics.default_info([
            (
                "userName",
                snapshot.selected_user.clone().unwrap_or_default(),
            ),
            ("timePeriod", snapshot.time_period.clone()),
            ("env", config.env.clone()),
        ]);

        let cache = opts.cache || config.cache;
        Ok(Self {
            config,
            snapshot,
            format: opts.format,
            analytics,
            cache,
        })
    }

    /// Report client for the resolved host.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingApiHost` when neither flag nor config
    /// names a server.
    pub fn client(&self) -> Result<Client> {
        let host = self.config.require_api_host()?;
        let raw = ReportClient::new(host)?;
        Ok(Arc::new(CachedAllocationClient::new(raw, self.caching())))
    }

    /// Whether downloads may be served from the response cache
    pub fn caching(&self) -> bool {
        self.cache
    }

    /// Leadership roster from config
    pub fn leadership(&self) -> &[String] {
        &self.config.leadership
    }
}
