//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Format rows as a rounded table, or `empty_message` when there are none
pub fn format_table<T: Tabled>(data: &[T], empty_message: &str) -> String {
    if data.is_empty() {
        return empty_message.to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Tabled)]
    struct TestRow {
        #[tabled(rename = "NAME")]
        name: String,
        #[tabled(rename = "SAVINGS")]
        savings: String,
    }

    fn row(name: &str, savings: &str) -> TestRow {
        TestRow {
            name: name.to_string(),
            savings: savings.to_string(),
        }
    }

    #[test]
    fn test_format_table_empty() {
        let items: Vec<TestRow> = vec![];
        assert_eq!(format_table(&items, "No instances."), "No instances.");
    }

    #[test]
    fn test_format_table_rows() {
        let items = vec![row("Bob", "$40"), row("Carol", "$39")];
        let result = format_table(&items, "");

        assert!(result.contains("NAME"));
        assert!(result.contains("SAVINGS"));
        assert!(result.contains("Bob"));
        assert!(result.contains("$39"));
    }

    #[test]
    fn test_format_table_uses_rounded_style() {
        let result = format_table(&[row("Bob", "$1")], "");

        assert!(result.contains("╭"));
        assert!(result.contains("╰"));
    }
}
