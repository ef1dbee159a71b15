//! Compute instance records

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A compute instance with its rightsizing figures.
///
/// Only `owners` and `waste` drive aggregation. Columns this crate does not
/// model are kept in `extra` so JSON output round-trips them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// User names accountable for this instance
    #[serde(default)]
    pub owners: Vec<String>,

    #[serde(default)]
    pub cost: f64,

    /// Potential annual savings from rightsizing
    #[serde(default)]
    pub waste: f64,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Instance {
    /// True if any of `names` is among the instance owners.
    pub fn is_owned_by<S: AsRef<str>>(&self, names: &[S]) -> bool {
        self.owners
            .iter()
            .any(|owner| names.iter().any(|n| n.as_ref() == owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(owners: &[&str]) -> Instance {
        Instance {
            instance_id: Some("i-0abc".to_string()),
            instance_type: None,
            recommended_type: None,
            region: None,
            owners: owners.iter().map(|s| s.to_string()).collect(),
            cost: 0.0,
            waste: 0.0,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_is_owned_by_single_owner() {
        let inst = owned(&["alice"]);
        assert!(inst.is_owned_by(&["alice"]));
        assert!(!inst.is_owned_by(&["bob"]));
    }

    #[test]
    fn test_is_owned_by_any_of_many() {
        let inst = owned(&["alice", "bob"]);
        assert!(inst.is_owned_by(&["carol", "bob"]));
    }

    #[test]
    fn test_is_owned_by_no_owners() {
        let inst = owned(&[]);
        assert!(!inst.is_owned_by(&["alice"]));
    }

    #[test]
    fn test_unknown_columns_are_preserved() {
        let json = r#"{
            "instance_id": "i-1",
            "owners": ["alice"],
            "waste": 12.5,
            "account": "prod-main",
            "cpu_p95": 3.2
        }"#;

        let inst: Instance = serde_json::from_str(json).unwrap();
        assert_eq!(inst.waste, 12.5);
        assert_eq!(inst.extra.get("account").unwrap(), "prod-main");

        let back = serde_json::to_value(&inst).unwrap();
        assert_eq!(back["cpu_p95"], 3.2);
    }
}
