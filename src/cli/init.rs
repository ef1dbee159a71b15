//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the report server, snapshot path, and leadership roster,
/// starting from any existing config so re-running init edits in place.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to cloudeff!".bold().green());
    println!("Let's set up your report configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;
    let theme = ColorfulTheme::default();

    let api_host: String = Input::with_theme(&theme)
        .with_prompt("Report server URL (blank to work offline)")
        .with_initial_text(
            opts.api_host_ref()
                .or(config.api_host.as_deref())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;
    config.api_host = non_empty(&api_host);

    let bootstrap_path: String = Input::with_theme(&theme)
        .with_prompt("Report snapshot file")
        .with_initial_text(
            opts.bootstrap_ref()
                .or(config.bootstrap_path.as_deref())
                .unwrap_or_default(),
        )
        .allow_empty(true)
        .interact_text()?;
    config.bootstrap_path = non_empty(&bootstrap_path);

    let leadership: String = Input::with_theme(&theme)
        .with_prompt("Leadership roster (comma-separated user names)")
        .with_initial_text(config.leadership.join(", "))
        .allow_empty(true)
        .interact_text()?;
    config.leadership = parse_roster(&leadership);

    let env: String = Input::with_theme(&theme)
        .with_prompt("Environment")
        .default(config.env.clone())
        .interact_text()?;
    config.env = env.trim().to_string();

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    if !config.leadership.is_empty() {
        println!("  Leadership: {}", config.leadership.join(", ").bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "cloudeff status".cyan());
    println!("  {} - Show the savings report", "cloudeff show".cyan());

    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split a comma-separated roster, dropping blanks.
fn parse_roster(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roster() {
        assert_eq!(
            parse_roster(" vp_one, vp_two ,,"),
            vec!["vp_one".to_string(), "vp_two".to_string()]
        );
        assert!(parse_roster("").is_empty());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(" http://x "), Some("http://x".to_string()));
    }
}
