//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - the full report laid out for reading
    #[default]
    Pretty,
    /// Table format - one row per team member / instance
    Table,
    /// JSON format - structured for scripts
    Json,
}
