//! Waste aggregation and user selection
//!
//! [`ViewModelBuilder`] turns a directory snapshot, an optional selected user
//! and an instance list into everything the renderer needs. Building is pure:
//! unresolved names come back as [`UnknownUserReference`] conditions in the
//! result instead of being logged here.

use std::cmp::Ordering;

use serde::Serialize;

use super::instance::Instance;
use super::user::{ReferenceRole, UnknownUserReference, User, UserDirectory};

/// Display data derived from one build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    /// Selected user, or `None` for the leadership view
    pub target_user: Option<User>,

    /// Target's manager when it resolves in the directory
    pub manager: Option<User>,

    /// Direct reports of the target, or the leadership roster, ordered by waste
    pub peers: Vec<User>,

    pub total_waste: f64,

    pub total_instance_count: u64,

    pub filtered_instances: Vec<Instance>,

    /// Names that failed to resolve while building
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<UnknownUserReference>,
}

impl ViewModel {
    pub fn is_leadership_view(&self) -> bool {
        self.target_user.is_none()
    }
}

/// Builds [`ViewModel`]s against a fixed directory and leadership roster.
#[derive(Debug, Clone, Copy)]
pub struct ViewModelBuilder<'a> {
    directory: &'a UserDirectory,
    default_peer_keys: &'a [String],
}

impl<'a> ViewModelBuilder<'a> {
    pub fn new(directory: &'a UserDirectory, default_peer_keys: &'a [String]) -> Self {
        Self {
            directory,
            default_peer_keys,
        }
    }

    /// Compute the view for `selected_user_key` over `all_instances`.
    ///
    /// An unknown selected key falls back to the leadership view.
    pub fn build(&self, selected_user_key: Option<&str>, all_instances: &[Instance]) -> ViewModel {
        let mut conditions = Vec::new();

        let target = selected_user_key.and_then(|key| {
            resolve_user(self.directory, key, ReferenceRole::Selected)
                .map_err(|miss| conditions.push(miss))
                .ok()
        });

        let (manager, peer_keys) = match target {
            Some(user) => {
                let manager = user.manager.as_deref().and_then(|name| {
                    resolve_user(self.directory, name, ReferenceRole::Manager)
                        .map_err(|miss| conditions.push(miss))
                        .ok()
                });
                (manager, user.reports.as_slice())
            }
            None => (None, self.default_peer_keys),
        };

        let (mut peers, missing) = resolve_peers(self.directory, peer_keys);
        conditions.extend(missing);

        let (total_waste, total_instance_count) = match target {
            Some(user) => (user.org_waste, user.org_instance_count),
            None => sum_org_totals(&peers),
        };

        order_peers(&mut peers);

        ViewModel {
            target_user: target.cloned(),
            manager: manager.cloned(),
            peers: peers.into_iter().cloned().collect(),
            total_waste,
            total_instance_count,
            filtered_instances: filter_instances(target, all_instances),
            conditions,
        }
    }
}

/// One-shot form of [`ViewModelBuilder::build`].
#[cfg(test)]
pub fn build(
    directory: &UserDirectory,
    selected_user_key: Option<&str>,
    default_peer_keys: &[String],
    all_instances: &[Instance],
) -> ViewModel {
    ViewModelBuilder::new(directory, default_peer_keys).build(selected_user_key, all_instances)
}

pub fn resolve_user<'d>(
    directory: &'d UserDirectory,
    name: &str,
    role: ReferenceRole,
) -> Result<&'d User, UnknownUserReference> {
    directory.resolve(name, role)
}

/// Resolve `names` in order, dropping and reporting each miss.
pub fn resolve_peers<'d, S: AsRef<str>>(
    directory: &'d UserDirectory,
    names: &[S],
) -> (Vec<&'d User>, Vec<UnknownUserReference>) {
    let mut found = Vec::with_capacity(names.len());
    let mut missing = Vec::new();

    for name in names {
        match directory.resolve(name.as_ref(), ReferenceRole::Report) {
            Ok(user) => found.push(user),
            Err(miss) => missing.push(miss),
        }
    }

    (found, missing)
}

/// Sum `org_waste` and `org_instance_count` over `users`.
pub fn sum_org_totals(users: &[&User]) -> (f64, u64) {
    users.iter().fold((0.0, 0), |(waste, count), u| {
        (waste + u.org_waste, count + u.org_instance_count)
    })
}

/// Descending `org_waste`, then ascending name.
pub fn compare_peers(a: &User, b: &User) -> Ordering {
    b.org_waste
        .total_cmp(&a.org_waste)
        .then_with(|| a.user_saml_name.cmp(&b.user_saml_name))
}

pub fn order_peers(peers: &mut [&User]) {
    peers.sort_by(|a, b| compare_peers(a, b));
}

/// Instances owned by `target`, or all of them for the leadership view.
pub fn filter_instances(target: Option<&User>, all_instances: &[Instance]) -> Vec<Instance> {
    match target {
        Some(user) => {
            let owner = [user.user_saml_name.as_str()];
            all_instances
                .iter()
                .filter(|i| i.is_owned_by(&owner))
                .cloned()
                .collect()
        }
        None => all_instances.to_vec(),
    }
}
