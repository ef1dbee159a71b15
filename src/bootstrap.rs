//! Report snapshot loading
//!
//! The report generator publishes one JSON snapshot per period carrying the
//! user directory, the first page of instances, and the period identifier.
//! It is loaded once at startup and passed down explicitly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allocation::{Instance, UserDirectory};
use crate::error::{BootstrapError, Result};

/// Startup data for one report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBootstrap")]
pub struct Bootstrap {
    /// User pre-selected by the publisher (the page's user)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_user: Option<String>,

    pub all_users: UserDirectory,

    /// Instances shown before the full list loads
    pub initial_instances: Vec<Instance>,

    pub time_period: String,
}

/// Snapshot as published. Report pages carry the global names (`userName`,
/// `allUsersDict`, `allInstances`), newer exports the camelCase field
/// names; either or both may appear.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBootstrap {
    #[serde(default)]
    selected_user: Option<String>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    all_users: Option<UserDirectory>,
    #[serde(default)]
    all_users_dict: Option<UserDirectory>,
    #[serde(default)]
    initial_instances: Option<Vec<Instance>>,
    #[serde(default)]
    all_instances: Option<Vec<Instance>>,
    #[serde(default)]
    time_period: String,
}

impl TryFrom<RawBootstrap> for Bootstrap {
    type Error = String;

    fn try_from(raw: RawBootstrap) -> std::result::Result<Self, Self::Error> {
        let all_users = raw
            .all_users
            .or(raw.all_users_dict)
            .ok_or("missing field `allUsers`")?;

        // An empty user name means no selection
        let selected_user = raw
            .selected_user
            .or(raw.user_name)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Ok(Self {
            selected_user,
            all_users,
            initial_instances: raw.initial_instances.or(raw.all_instances).unwrap_or_default(),
            time_period: raw.time_period,
        })
    }
}

impl Bootstrap {
    /// Parse a snapshot from JSON text.
    pub fn from_json(contents: &str) -> Result<Self> {
        let snapshot: Bootstrap = serde_json::from_str(contents)
            .map_err(|e| BootstrapError::Parse(e.to_string()))?;

        if snapshot.time_period.trim().is_empty() {
            return Err(BootstrapError::MissingTimePeriod.into());
        }

        Ok(snapshot)
    }

    /// Read and parse a snapshot file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| BootstrapError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let snapshot = Self::from_json(&contents)?;
        if snapshot.all_users.is_empty() {
            log::warn!("Snapshot {} has no users", path.display());
        }
        log::debug!(
            "Loaded snapshot for {} ({} users, {} initial instances)",
            snapshot.time_period,
            snapshot.all_users.len(),
            snapshot.initial_instances.len()
        );
        Ok(snapshot)
    }

    /// Load from the first available path.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = path.ok_or(BootstrapError::Missing)?;
        Self::load_from(Path::new(path))
    }
}
