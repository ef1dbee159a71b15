//! Reusable formatting utilities for CLI output
//!
//! Money and name formatting shared by the pretty renderer and the display
//! models.

/// Format an annualized dollar amount: whole dollars, thousands separators.
///
/// # Example output
/// - `$12,345`
/// - `-$80`
pub fn format_money_annual(amount: f64) -> String {
    if !amount.is_finite() {
        return "--".to_string();
    }

    let rounded = amount.round();
    let digits = group_thousands(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Money with an instance count suffix.
///
/// # Example output
/// - `$12,345 (3 instances)`
/// - `$40 (1 instance)`
pub fn format_money_annual_icon(amount: f64, instance_count: u64, show_count: bool) -> String {
    let money = format_money_annual(amount);
    if !show_count {
        return money;
    }
    let noun = if instance_count == 1 {
        "instance"
    } else {
        "instances"
    };
    format!("{} ({} {})", money, group_thousands(instance_count), noun)
}

/// Turn a SAML user name into a display name: `jane_doe` → `Jane Doe`.
pub fn format_name(user_saml_name: &str) -> String {
    let words: Vec<String> = user_saml_name
        .split(['_', '.', '-'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect();

    if words.is_empty() {
        user_saml_name.to_string()
    } else {
        words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
