//! Report display command
//!
//! Builds the view from the snapshot's initial instances, then downloads the
//! full instance list once and rebuilds. A failed download keeps the initial
//! view and warns.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};

use crate::allocation::{Instance, ViewModel, ViewModelBuilder};
use crate::analytics::{Analytics, Event};
use crate::bootstrap::Bootstrap;
use crate::cli::{CommandContext, GlobalOptions, OutputFormat, SelectionArgs};
use crate::client::AllocationApi;
use crate::error::{BootstrapError, Error, Result};
use crate::models::ReportView;
use crate::output::Formattable;
use crate::route::Route;

/// Which user and period to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub user: Option<String>,
    pub time_period: String,
}

impl Selection {
    /// Resolve flags against the snapshot.
    ///
    /// `--user` wins, then a `--page` path, then the snapshot's own user.
    /// A page from another period is rejected, since the directory only
    /// covers the snapshot's period.
    pub fn resolve(
        args: &SelectionArgs,
        snapshot_user: Option<&str>,
        snapshot_period: &str,
    ) -> Result<Self> {
        let route = match args.page.as_deref() {
            Some(page) => Some(
                Route::parse(page)
                    .ok_or_else(|| Error::Other(format!("Not a report page: {}", page)))?,
            ),
            None => None,
        };

        let user = match (&args.user, &route) {
            (Some(user), _) => Some(user.clone()),
            (None, Some(route)) => route.user.clone(),
            (None, None) => snapshot_user.map(str::to_string),
        };

        if let Some(route) = &route
            && route.time_period != snapshot_period
        {
            return Err(BootstrapError::PeriodMismatch {
                page: route.time_period.clone(),
                snapshot: snapshot_period.to_string(),
            }
            .into());
        }

        Ok(Self {
            user,
            time_period: snapshot_period.to_string(),
        })
    }
}

/// Result of building a view with an optional download
#[derive(Debug)]
pub struct LoadOutcome {
    pub view: ViewModel,
    pub instances_loaded: bool,
    pub fetch_error: Option<Error>,
}

/// Build against `initial`, then rebuild with the downloaded list.
///
/// With no client the initial view is returned as not loaded. A download
/// error is returned alongside the initial view rather than failing.
pub async fn load_view<C: AllocationApi + ?Sized>(
    builder: &ViewModelBuilder<'_>,
    selected: Option<&str>,
    initial: &[Instance],
    client: Option<&C>,
    time_period: &str,
) -> LoadOutcome {
    let initial_view = builder.build(selected, initial);

    let Some(client) = client else {
        return LoadOutcome {
            view: initial_view,
            instances_loaded: false,
            fetch_error: None,
        };
    };

    match client.list_instances(time_period).await {
        Ok(all_instances) => {
            debug!(
                "Rebuilding view with {} downloaded instances",
                all_instances.len()
            );
            LoadOutcome {
                view: builder.build(selected, &all_instances),
                instances_loaded: true,
                fetch_error: None,
            }
        }
        Err(err) => LoadOutcome {
            view: initial_view,
            instances_loaded: false,
            fetch_error: Some(err),
        },
    }
}

/// Build the report for `selection`, downloading unless offline.
pub async fn build_report(
    ctx: &CommandContext,
    selection: &Selection,
    offline: bool,
) -> Result<ReportView> {
    let builder = ViewModelBuilder::new(&ctx.snapshot.all_users, ctx.leadership());
    let client = if offline { None } else { Some(ctx.client()?) };

    let spinner = match (&client, ctx.format) {
        (Some(_), OutputFormat::Pretty) => Some(download_spinner(&selection.time_period)),
        _ => None,
    };

    let outcome = load_view(
        &builder,
        selection.user.as_deref(),
        &ctx.snapshot.initial_instances,
        client.as_deref(),
        &selection.time_period,
    )
    .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if let Some(err) = &outcome.fetch_error {
        warn!("Instance download failed: {}", err);
        eprintln!(
            "{} Could not load the full instance list ({}). Showing the snapshot's initial instances.",
            "⚠".yellow(),
            err
        );
    }

    for condition in &outcome.view.conditions {
        warn!("{}", condition);
    }

    Ok(
        ReportView::new(&selection.time_period, outcome.view, outcome.instances_loaded)
            .with_help(&ctx.config.help_link, &ctx.config.help_text),
    )
}

fn download_spinner(time_period: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Loading instances for {}...", time_period));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Record the interaction that led to this view.
///
/// `AppMount` always; `click` only when `--user` or `--page` picked someone,
/// with `target` set to `manager` when that is the snapshot user's manager.
pub fn record_selection(
    analytics: &Analytics,
    snapshot: &Bootstrap,
    args: &SelectionArgs,
    selection: &Selection,
) {
    analytics.record(Event::new("AppMount"));

    let Some(user) = selection.user.as_deref() else {
        return;
    };
    if args.user.is_none() && args.page.is_none() {
        return;
    }

    let current_manager = snapshot
        .selected_user
        .as_deref()
        .and_then(|current| snapshot.all_users.get(current))
        .and_then(|u| u.manager.as_deref());
    let target = if current_manager == Some(user) {
        "manager"
    } else {
        "teammember"
    };

    analytics.record(Event::new("click").attr("target", target).attr("targetUser", user));
}

/// Run the show command
pub async fn run(opts: &GlobalOptions, args: &SelectionArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let selection = Selection::resolve(
        args,
        ctx.snapshot.selected_user.as_deref(),
        &ctx.snapshot.time_period,
    )?;
    debug!("Showing {:?}", selection);

    record_selection(&ctx.analytics, &ctx.snapshot, args, &selection);

    let report = build_report(&ctx, &selection, args.offline).await?;
    report.print(ctx.format)
}
