//! Pretty terminal rendering of a report
//!
//! Layout, top to bottom: title bar, selected user (or leadership) summary,
//! savings explanation, team listing with total, instance listing, footer.

use std::fmt::Write;

use colored::Colorize;

use super::formatters::{format_money_annual, format_money_annual_icon, format_name};
use super::table::format_table;
use crate::models::{InstanceDisplay, ReportView};
use crate::route;

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Days covered by one reporting period
const PERIOD_DAYS: u32 = 10;

/// Render the whole report as one string
pub fn render_report(report: &ReportView) -> String {
    let mut out = String::new();
    top_bar(&mut out, report);
    user_section(&mut out, report);
    team_section(&mut out, report);
    instance_section(&mut out, report);
    bottom_bar(&mut out, report);
    out
}

/// One-sentence explanation of what the totals cover
pub fn savings_explanation(report: &ReportView) -> String {
    let view = &report.view;
    match &view.target_user {
        Some(user) => {
            let name = format_name(&user.user_saml_name);
            let has_team = !view.peers.is_empty();
            format!(
                "You are looking at annualized potential savings based on the {} day period ending at {} for {}{}. {}'s personal potential savings{} = {}.",
                PERIOD_DAYS,
                report.time_period,
                name,
                if has_team { " and team" } else { "" },
                name,
                if has_team { " plus their team's" } else { "" },
                format_money_annual(view.total_waste),
            )
        }
        None => format!(
            "You are looking at annualized potential savings based on the {} day period ending at {} for the leadership group.",
            PERIOD_DAYS, report.time_period
        ),
    }
}

fn top_bar(out: &mut String, report: &ReportView) {
    let _ = writeln!(
        out,
        "{} | c-type Rightsizing | {} {}",
        "Cloud Efficiency".bold(),
        "Period:".dimmed(),
        report.time_period.cyan()
    );
    let _ = writeln!(out, "{}", RULE.dimmed());
}

fn user_section(out: &mut String, report: &ReportView) {
    let view = &report.view;
    match &view.target_user {
        Some(user) => {
            let _ = writeln!(out, "{}", format_name(&user.user_saml_name).bold());
            let _ = writeln!(
                out,
                "Personal potential annual savings: {}",
                format_money_annual_icon(user.waste, user.instance_count, true).green()
            );
            if let Some(manager) = &view.manager {
                let _ = writeln!(
                    out,
                    "Manager: {} {}",
                    format_name(&manager.user_saml_name),
                    route::user_url(&report.time_period, &manager.user_saml_name).dimmed()
                );
            }
        }
        None => {
            let _ = writeln!(out, "{}", "Leadership Team".bold());
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", savings_explanation(report).dimmed());
    let _ = writeln!(out);
}

fn team_section(out: &mut String, report: &ReportView) {
    let view = &report.view;
    if view.peers.is_empty() {
        return;
    }

    let heading = if view.is_leadership_view() {
        "Team Members"
    } else {
        "Direct Reports"
    };

    let names: Vec<String> = view
        .peers
        .iter()
        .map(|u| format_name(&u.user_saml_name))
        .collect();
    let width = names
        .iter()
        .map(|n| n.chars().count())
        .chain([heading.len(), "Team Total:".len()])
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        out,
        "{:<width$}  {}",
        heading.bold(),
        "Potential Annual Savings".bold()
    );
    for (name, user) in names.iter().zip(&view.peers) {
        let _ = writeln!(
            out,
            "{:<width$}  {}",
            name,
            format_money_annual_icon(user.org_waste, user.org_instance_count, true)
        );
    }
    let _ = writeln!(
        out,
        "{:<width$}  {}",
        "Team Total:",
        format_money_annual_icon(view.total_waste, view.total_instance_count, true)
            .green()
            .bold()
    );
    let _ = writeln!(out);
}

fn instance_section(out: &mut String, report: &ReportView) {
    let instances = &report.view.filtered_instances;
    let _ = writeln!(out, "{} ({})", "Instances".bold(), instances.len());

    if !report.instances_loaded {
        let _ = writeln!(out, "{}", "Loading instances... (showing initial snapshot)".yellow());
    }

    let rows: Vec<InstanceDisplay> = instances.iter().map(InstanceDisplay::from).collect();
    let _ = writeln!(out, "{}", format_table(&rows, "No instances found."));
}

fn bottom_bar(out: &mut String, report: &ReportView) {
    let _ = writeln!(out, "{}", RULE.dimmed());
    let _ = writeln!(
        out,
        "{}: {}",
        report.help_text,
        report.help_link.cyan().underline()
    );
}
