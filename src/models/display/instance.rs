//! Instance listing display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{or_dash, truncate_string};
use crate::allocation::Instance;
use crate::output::formatters::format_money_annual;

/// Owners column width before truncation
const OWNERS_WIDTH: usize = 40;

/// One row of the instance listing.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct InstanceDisplay {
    #[tabled(rename = "INSTANCE")]
    pub id: String,

    #[tabled(rename = "TYPE")]
    pub instance_type: String,

    #[tabled(rename = "RECOMMENDED")]
    pub recommended_type: String,

    #[tabled(rename = "REGION")]
    pub region: String,

    #[tabled(rename = "OWNERS")]
    pub owners: String,

    #[tabled(rename = "POTENTIAL SAVINGS")]
    pub savings: String,
}

impl From<&Instance> for InstanceDisplay {
    fn from(instance: &Instance) -> Self {
        Self {
            id: or_dash(instance.instance_id.as_deref()),
            instance_type: or_dash(instance.instance_type.as_deref()),
            recommended_type: or_dash(instance.recommended_type.as_deref()),
            region: or_dash(instance.region.as_deref()),
            owners: truncate_string(&instance.owners.join(", "), OWNERS_WIDTH),
            savings: format_money_annual(instance.waste),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_instance_display() {
        let instance = Instance {
            instance_id: Some("i-0abc".to_string()),
            instance_type: Some("c5.9xlarge".to_string()),
            recommended_type: Some("c5.xlarge".to_string()),
            region: None,
            owners: vec!["alice".to_string(), "bob".to_string()],
            cost: 14000.0,
            waste: 12500.4,
            extra: BTreeMap::new(),
        };

        let display = InstanceDisplay::from(&instance);

        assert_eq!(display.id, "i-0abc");
        assert_eq!(display.region, "--");
        assert_eq!(display.owners, "alice, bob");
        assert_eq!(display.savings, "$12,500");
    }
}
