//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Deterministic cache key for a request.
///
/// Hashes the endpoint name, the server host, and the reporting period, so
/// the same period published by two servers never collides.
pub fn cache_key(endpoint: &str, host: &str, time_period: &str) -> String {
    let mut hasher = Sha256::new();

    for part in [endpoint, host, time_period] {
        hasher.update(part.as_bytes());
        hasher.update(b"|");
    }

    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let a = cache_key("list_instances", "https://r.example.com", "2018-10-01");
        let b = cache_key("list_instances", "https://r.example.com", "2018-10-01");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_cache_key_varies_by_period() {
        let a = cache_key("list_instances", "h", "2018-10-01");
        let b = cache_key("list_instances", "h", "2018-10-11");
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_key_varies_by_host() {
        let a = cache_key("list_instances", "https://a", "p");
        let b = cache_key("list_instances", "https://b", "p");
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_key_separator_prevents_ambiguity() {
        let a = cache_key("ab", "c", "p");
        let b = cache_key("a", "bc", "p");
        assert_ne!(a, b);
    }
}
