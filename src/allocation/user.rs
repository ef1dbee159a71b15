//! Users and the user directory

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An employee record with personal and team-aggregated figures.
///
/// The `org_*` fields cover the user and their full reporting subtree and are
/// computed upstream; they are never recomputed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique directory key
    pub user_saml_name: String,

    /// Personal annualized cost
    #[serde(default)]
    pub cost: f64,

    /// Personal potential annual savings
    #[serde(default)]
    pub waste: f64,

    /// Instances owned personally
    #[serde(default)]
    pub instance_count: u64,

    /// Cost of the user plus their reporting subtree
    #[serde(default)]
    pub org_cost: f64,

    /// Waste of the user plus their reporting subtree
    #[serde(default)]
    pub org_waste: f64,

    /// Instance count of the user plus their reporting subtree
    #[serde(default)]
    pub org_instance_count: u64,

    /// Manager name, absent for leadership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,

    /// Direct report names, in directory order
    #[serde(default)]
    pub reports: Vec<String>,
}

/// Where an unresolved name was referenced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRole {
    /// The user requested for display
    Selected,
    /// The selected user's manager
    Manager,
    /// A direct report or leadership roster entry
    Report,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ReferenceRole::Selected => "user",
            ReferenceRole::Manager => "manager",
            ReferenceRole::Report => "report",
        };
        f.write_str(label)
    }
}

/// A referenced name that is absent from the directory.
///
/// This is a condition, not an error: callers log it and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownUserReference {
    pub name: String,
    pub role: ReferenceRole,
}

impl fmt::Display for UnknownUserReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {}", self.role, self.name)
    }
}

/// Immutable snapshot of all users keyed by `user_saml_name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    /// Build a directory from user records, keyed by their names.
    ///
    /// A later record with a duplicate name replaces the earlier one.
    #[cfg(test)]
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.user_saml_name.clone(), u))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All user names, sorted ascending
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.users.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up `name`, tagging a miss with the role it was referenced as.
    pub fn resolve(
        &self,
        name: &str,
        role: ReferenceRole,
    ) -> Result<&User, UnknownUserReference> {
        self.users.get(name).ok_or_else(|| UnknownUserReference {
            name: name.to_string(),
            role,
        })
    }
}
