//! User listing command

use log::warn;

use crate::allocation::{User, UserDirectory, view};
use crate::cli::{CommandContext, GlobalOptions};
use crate::error::Result;
use crate::models::PeerDisplay;
use crate::output::Formattable;

/// Run the users command
pub async fn run(opts: &GlobalOptions, manager: Option<&str>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    if let Some(name) = manager
        && !ctx.snapshot.all_users.contains(name)
    {
        warn!("Manager {} is not in the snapshot", name);
    }

    let rows: Vec<PeerDisplay> = list_users(&ctx.snapshot.all_users, manager)
        .into_iter()
        .map(PeerDisplay::from)
        .collect();

    rows.print(ctx.format)
}

/// Users in the directory, highest team savings first.
///
/// With `manager`, only users whose manager is that name.
pub fn list_users<'d>(directory: &'d UserDirectory, manager: Option<&str>) -> Vec<&'d User> {
    let mut users: Vec<&User> = directory
        .names()
        .into_iter()
        .filter_map(|name| directory.get(name))
        .filter(|user| manager.is_none() || user.manager.as_deref() == manager)
        .collect();
    view::order_peers(&mut users);
    users
}
