//! Peer (direct report / leadership) display model

use serde::Serialize;
use tabled::Tabled;

use crate::allocation::User;
use crate::output::formatters::{format_money_annual, format_name};

/// One row of the team listing.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PeerDisplay {
    #[tabled(rename = "USER")]
    pub user: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Annual savings for the user and their team
    #[tabled(rename = "POTENTIAL SAVINGS")]
    pub savings: String,

    #[tabled(rename = "INSTANCES")]
    pub instances: u64,
}

impl From<&User> for PeerDisplay {
    fn from(user: &User) -> Self {
        Self {
            user: user.user_saml_name.clone(),
            name: format_name(&user.user_saml_name),
            savings: format_money_annual(user.org_waste),
            instances: user.org_instance_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_display_uses_org_figures() {
        let user = User {
            user_saml_name: "jane_doe".to_string(),
            cost: 10.0,
            waste: 5.0,
            instance_count: 1,
            org_cost: 9000.0,
            org_waste: 4321.0,
            org_instance_count: 12,
            manager: Some("vp".to_string()),
            reports: vec![],
        };

        let display = PeerDisplay::from(&user);

        assert_eq!(display.user, "jane_doe");
        assert_eq!(display.name, "Jane Doe");
        assert_eq!(display.savings, "$4,321");
        assert_eq!(display.instances, 12);
    }
}
