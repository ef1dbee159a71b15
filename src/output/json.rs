//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

/// Wrapper for JSON output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the `{data, meta}` envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Peer {
        user_saml_name: String,
        org_waste: f64,
    }

    #[test]
    fn test_envelope_carries_version() {
        let output = JsonOutput::new(vec!["alice"]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_json_envelope() {
        let peers = vec![Peer {
            user_saml_name: "bob".to_string(),
            org_waste: 40.0,
        }];

        let parsed: serde_json::Value =
            serde_json::from_str(&format_json(&peers).unwrap()).unwrap();

        assert_eq!(parsed["data"][0]["user_saml_name"], "bob");
        assert_eq!(parsed["data"][0]["org_waste"], 40.0);
        assert!(parsed["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_json_empty_vec() {
        let peers: Vec<Peer> = vec![];
        assert!(format_json(&peers).unwrap().contains("\"data\": []"));
    }
}
