//! Usage analytics
//!
//! Events are fire-and-forget: recording never returns an error and never
//! blocks the command on a slow sink. Sink failures are logged and dropped.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use serde::Serialize;

/// A named event with string attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// An event as delivered to a sink, with defaults merged and a timestamp
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub timestamp: String,
    #[serde(flatten)]
    pub event: Event,
}

/// Destination for analytics records
pub trait AnalyticsSink: Send + Sync {
    fn send(&self, record: &Record);
}

/// Emits records to the debug log
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn send(&self, record: &Record) {
        log::debug!("analytics {} {:?}", record.event.name, record.event.attributes);
    }
}

/// Appends records as JSON lines to a file
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn append(&self, record: &Record) -> std::io::Result<()> {
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl AnalyticsSink for FileSink {
    fn send(&self, record: &Record) {
        if let Err(e) = self.append(record) {
            log::warn!("Dropping analytics event {}: {}", record.event.name, e);
        }
    }
}

/// Event recorder with default attributes applied to every event
pub struct Analytics {
    defaults: Mutex<BTreeMap<String, String>>,
    sink: Box<dyn AnalyticsSink>,
}

impl Analytics {
    pub fn new(sink: Box<dyn AnalyticsSink>) -> Self {
        Self {
            defaults: Mutex::new(BTreeMap::new()),
            sink,
        }
    }

    /// Log-only analytics, or a JSON-lines file when `path` is given
    pub fn from_log_path(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::new(Box::new(FileSink::new(p))),
            None => Self::new(Box::new(LogSink)),
        }
    }

    /// Set attributes merged into every later event
    pub fn default_info<I, K, V>(&self, info: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        if let Ok(mut defaults) = self.defaults.lock() {
            defaults.extend(info.into_iter().map(|(k, v)| (k.into(), v.into())));
        }
    }

    /// Record an event; event attributes win over defaults
    pub fn record(&self, event: Event) {
        let mut attributes = self
            .defaults
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default();
        attributes.extend(event.attributes);

        let record = Record {
            timestamp: Utc::now().to_rfc3339(),
            event: Event {
                name: event.name,
                attributes,
            },
        };
        self.sink.send(&record);
    }
}

/// Keeps records in memory for assertions
#[cfg(test)]
#[derive(Default, Clone)]
pub struct MemorySink {
    pub records: std::sync::Arc<Mutex<Vec<Record>>>,
}

#[cfg(test)]
impl MemorySink {
    /// Names and attributes of everything recorded so far
    pub fn events(&self) -> Vec<Event> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.event.clone())
            .collect()
    }
}

#[cfg(test)]
impl AnalyticsSink for MemorySink {
    fn send(&self, record: &Record) {
        self.records.lock().unwrap().push(record.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_merged_and_overridden() {
        let sink = MemorySink::default();
        let analytics = Analytics::new(Box::new(sink.clone()));
        analytics.default_info([("env", "dev"), ("timePeriod", "p1")]);

        analytics.record(Event::new("click").attr("target", "manager").attr("env", "prod"));

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        let attrs = &records[0].event.attributes;
        assert_eq!(attrs["target"], "manager");
        assert_eq!(attrs["env"], "prod");
        assert_eq!(attrs["timePeriod"], "p1");
    }

    #[test]
    fn test_file_sink_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let analytics = Analytics::from_log_path(path.to_str());

        analytics.record(Event::new("AppMount"));
        analytics.record(Event::new("click").attr("target", "teammember"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["name"], "click");
        assert_eq!(second["attributes"]["target"], "teammember");
    }

    #[test]
    fn test_file_sink_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened for append
        let analytics = Analytics::from_log_path(dir.path().to_str());

        analytics.record(Event::new("AppMount"));
    }
}
