//! Cache management commands

use crate::cache::CacheStorage;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Show cache status/statistics
pub fn status(format: OutputFormat) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = cache.stats()?;
    let path = CacheStorage::cache_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "total_size_bytes": stats.total_size_bytes,
                "total_size_human": format_size(stats.total_size_bytes),
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "path": path,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Valid entries:  {}", stats.valid_entries);
            println!("Expired:        {}", stats.expired_entries);
            println!("Total size:     {}", format_size(stats.total_size_bytes));

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp(newest));
            }
        }
    }

    Ok(())
}

/// Clear cached downloads, for one period or all of them
pub fn clear(format: OutputFormat, period: Option<&str>) -> Result<()> {
    let cache = CacheStorage::open()?;
    let stats = match period {
        Some(period) => cache.clear_period(period)?,
        None => cache.clear_all()?,
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "period": period,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => match (stats.entries_removed, period) {
            (0, Some(period)) => println!("No cache entries for {}", period),
            (0, None) => println!("Cache was already empty"),
            (n, Some(period)) => println!("Cleared {} cache entries for {}", n, period),
            (n, None) => println!("Cleared {} cache entries", n),
        },
    }

    Ok(())
}

/// Show cache path
pub fn path() -> Result<()> {
    let path = CacheStorage::cache_dir()?;
    println!("{}", path.display());
    Ok(())
}

fn format_timestamp(secs: i64) -> String {
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
