//! Output formatting for CLI results

use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{InstanceDisplay, PeerDisplay, ReportView};

pub mod formatters;
pub mod json;
pub mod render;
pub mod table;

/// Types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;

    /// Format and print to stdout
    fn print(&self, format: OutputFormat) -> Result<()> {
        println!("{}", self.format(format)?);
        Ok(())
    }
}

impl<T: Tabled + Serialize> Formattable for Vec<T> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty | OutputFormat::Table => {
                Ok(table::format_table(self, "No results found."))
            }
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

impl Formattable for ReportView {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(render::render_report(self)),
            OutputFormat::Table => {
                let peers: Vec<PeerDisplay> = self.view.peers.iter().map(PeerDisplay::from).collect();
                let instances: Vec<InstanceDisplay> = self
                    .view
                    .filtered_instances
                    .iter()
                    .map(InstanceDisplay::from)
                    .collect();
                Ok(format!(
                    "{}\n{}",
                    table::format_table(&peers, "No team members."),
                    table::format_table(&instances, "No instances found.")
                ))
            }
            OutputFormat::Json => Ok(json::format_json(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::{User, UserDirectory, view};

    fn report() -> ReportView {
        let dir = UserDirectory::from_users(vec![User {
            user_saml_name: "vp_one".to_string(),
            cost: 0.0,
            waste: 0.0,
            instance_count: 0,
            org_cost: 0.0,
            org_waste: 77.0,
            org_instance_count: 3,
            manager: None,
            reports: vec![],
        }]);
        let roster = vec!["vp_one".to_string(), "ghost".to_string()];
        ReportView::new("p1", view::build(&dir, None, &roster, &[]), true)
    }

    #[test]
    fn test_report_json_shape() {
        let text = report().format(OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let data = &parsed["data"];

        assert_eq!(data["time_period"], "p1");
        assert_eq!(data["url"], "/p1/allocation/");
        assert!(data["target_user"].is_null());
        assert_eq!(data["total_waste"], 77.0);
        assert_eq!(data["peers"][0]["user_saml_name"], "vp_one");
        assert_eq!(data["conditions"][0]["name"], "ghost");
        assert_eq!(data["conditions"][0]["role"], "report");
    }

    #[test]
    fn test_report_table_has_both_tables() {
        let text = report().format(OutputFormat::Table).unwrap();
        assert!(text.contains("POTENTIAL SAVINGS"));
        assert!(text.contains("vp_one"));
        assert!(text.contains("No instances found."));
    }

    #[test]
    fn test_vec_table_empty() {
        let rows: Vec<PeerDisplay> = vec![];
        assert_eq!(
            rows.format(OutputFormat::Table).unwrap(),
            "No results found."
        );
    }
}
