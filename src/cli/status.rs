//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::bootstrap::Bootstrap;
use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Resolved configuration, as reported by `status --format json`
#[derive(Debug, Serialize)]
struct StatusReport {
    config_path: String,
    config_found: bool,
    api_host: Option<String>,
    bootstrap_path: Option<String>,
    snapshot: Option<SnapshotSummary>,
    snapshot_error: Option<String>,
    leadership: Vec<String>,
    env: String,
    analytics_log: Option<String>,
    default_format: Option<String>,
    cache_enabled: bool,
    cache_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct SnapshotSummary {
    time_period: String,
    selected_user: Option<String>,
    users: usize,
    initial_instances: usize,
}

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let report = collect(opts)?;

    match opts.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_pretty(&report),
    }

    Ok(())
}

fn collect(opts: &GlobalOptions) -> Result<StatusReport> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config_found = config_path.exists();
    let config = Config::load_or_default(opts.config_ref())?;

    let api_host = opts
        .api_host_ref()
        .map(str::to_string)
        .or_else(|| config.api_host.clone());
    let bootstrap_path = opts
        .bootstrap_ref()
        .map(str::to_string)
        .or_else(|| config.bootstrap_path.clone());

    let (snapshot, snapshot_error) = match bootstrap_path.as_deref() {
        Some(path) => match Bootstrap::load_at(Some(path)) {
            Ok(b) => (
                Some(SnapshotSummary {
                    time_period: b.time_period,
                    selected_user: b.selected_user,
                    users: b.all_users.len(),
                    initial_instances: b.initial_instances.len(),
                }),
                None,
            ),
            Err(e) => (None, Some(e.to_string())),
        },
        None => (None, None),
    };

    Ok(StatusReport {
        config_path: config_path.display().to_string(),
        config_found,
        api_host,
        bootstrap_path,
        snapshot,
        snapshot_error,
        leadership: config.leadership,
        env: config.env,
        analytics_log: config.analytics_log,
        default_format: config.preferences.format,
        cache_enabled: opts.cache || config.cache,
        cache_path: CacheStorage::cache_dir()
            .ok()
            .map(|p| p.display().to_string()),
    })
}

fn print_pretty(report: &StatusReport) {
    println!("{}\n", "cloudeff Configuration Status".bold());

    if report.config_found {
        println!("Config file: {}", report.config_path.cyan());
    } else {
        println!(
            "{} Config file not found: {}",
            "○".dimmed(),
            report.config_path
        );
        println!("  → Run 'cloudeff init' to create one");
    }
    println!("Environment: {}", report.env);
    println!();

    match &report.api_host {
        Some(host) => println!("{} Report server: {}", "✓".green(), host.cyan()),
        None => {
            println!("{} Report server not configured", "✗".red());
            println!("  → Only --offline reports are available");
        }
    }

    match (&report.snapshot, &report.snapshot_error, &report.bootstrap_path) {
        (Some(s), _, Some(path)) => {
            println!("{} Snapshot: {}", "✓".green(), path.cyan());
            println!("  Period: {}", s.time_period);
            if let Some(user) = &s.selected_user {
                println!("  User: {}", user.bold());
            }
            println!(
                "  {} users, {} initial instances",
                s.users, s.initial_instances
            );
        }
        (_, Some(err), _) => println!("{} Snapshot unreadable: {}", "✗".red(), err),
        _ => {
            println!("{} No snapshot configured", "✗".red());
            println!("  → Pass --bootstrap <FILE> or set bootstrap_path");
        }
    }

    if report.leadership.is_empty() {
        println!("{} Leadership roster is empty", "⚠".yellow());
    } else {
        println!(
            "{} Leadership: {}",
            "✓".green(),
            report.leadership.join(", ")
        );
    }

    if let Some(log) = &report.analytics_log {
        println!("{} Analytics log: {}", "○".dimmed(), log);
    }
    if let Some(format) = &report.default_format {
        println!("{} Default format: {}", "○".dimmed(), format);
    }
    if let Some(path) = &report.cache_path {
        let state = if report.cache_enabled { "on" } else { "off" };
        println!("{} Cache ({}): {}", "○".dimmed(), state, path.dimmed());
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn opts(config: &str, bootstrap: Option<&str>) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Json,
            config: Some(config.to_string()),
            bootstrap: bootstrap.map(str::to_string),
            api_host: None,
            cache: false,
        }
    }

    #[test]
    fn test_collect_without_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");

        let report = collect(&opts(path.to_str().unwrap(), None)).unwrap();

        assert!(!report.config_found);
        assert!(report.api_host.is_none());
        assert!(report.snapshot.is_none());
        assert_eq!(report.env, "dev");
    }

    #[test]
    fn test_collect_reads_snapshot() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "api_host: http://reports.local\nleadership: [vp_one]\n",
        )
        .unwrap();

        let snapshot_path = dir.path().join("snapshot.json");
        let mut f = std::fs::File::create(&snapshot_path).unwrap();
        write!(
            f,
            r#"{{"timePeriod": "p1", "userName": "alice",
                "allUsersDict": {{"alice": {{"user_saml_name": "alice"}}}},
                "allInstances": []}}"#
        )
        .unwrap();

        let report = collect(&opts(
            config_path.to_str().unwrap(),
            snapshot_path.to_str(),
        ))
        .unwrap();

        assert!(report.config_found);
        assert_eq!(report.api_host.as_deref(), Some("http://reports.local"));
        assert_eq!(report.leadership, vec!["vp_one".to_string()]);
        let snapshot = report.snapshot.unwrap();
        assert_eq!(snapshot.time_period, "p1");
        assert_eq!(snapshot.users, 1);
    }
}
