//! Instance listing command

use log::debug;

use crate::cli::show::{Selection, build_report, record_selection};
use crate::cli::{CommandContext, GlobalOptions, SelectionArgs};
use crate::error::Result;
use crate::models::InstanceDisplay;
use crate::output::Formattable;

/// Run the instances command
pub async fn run(opts: &GlobalOptions, args: &SelectionArgs, limit: Option<usize>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let selection = Selection::resolve(
        args,
        ctx.snapshot.selected_user.as_deref(),
        &ctx.snapshot.time_period,
    )?;

    record_selection(&ctx.analytics, &ctx.snapshot, args, &selection);

    let report = build_report(&ctx, &selection, args.offline).await?;
    let rows = limit_rows(
        report
            .view
            .filtered_instances
            .iter()
            .map(InstanceDisplay::from)
            .collect(),
        limit,
    );
    debug!("Listing {} instances", rows.len());

    rows.print(ctx.format)
}

fn limit_rows<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_rows() {
        assert_eq!(limit_rows(vec![1, 2, 3], Some(2)), vec![1, 2]);
        assert_eq!(limit_rows(vec![1, 2, 3], None), vec![1, 2, 3]);
        assert_eq!(limit_rows(vec![1], Some(5)), vec![1]);
    }
}
