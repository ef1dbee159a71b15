//! Mock report client for testing
//!
//! Provides a mock implementation of [`AllocationApi`] for unit testing
//! without making real HTTP calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::AllocationApi;
use crate::allocation::Instance;
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// # Example
/// ```ignore
/// let mock = MockAllocationClient::new().with_instances(vec![...]).await;
/// let instances = mock.list_instances("2018-10-01").await?;
/// ```
#[derive(Default)]
pub struct MockAllocationClient {
    /// Instances to return from list_instances
    instances: Arc<Mutex<Vec<Instance>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Periods requested, in call order
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockAllocationClient {
    /// Create a new mock client with an empty instance list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure instances to return from list_instances.
    pub async fn with_instances(self, instances: Vec<Instance>) -> Self {
        *self.instances.lock().await = instances;
        self
    }

    /// Configure an error to return on the next call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Periods requested so far.
    pub async fn requested(&self) -> Vec<String> {
        self.requested.lock().await.clone()
    }
}

#[async_trait]
impl AllocationApi for MockAllocationClient {
    async fn list_instances(&self, time_period: &str) -> Result<Vec<Instance>> {
        self.requested.lock().await.push(time_period.to_string());

        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }

        Ok(self.instances.lock().await.clone())
    }

    fn host(&self) -> &str {
        "mock://reports"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_records_requests() {
        let mock = MockAllocationClient::new();
        mock.list_instances("p1").await.unwrap();
        mock.list_instances("p2").await.unwrap();

        assert_eq!(mock.requested().await, vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn test_mock_error_consumed_once() {
        let mock = MockAllocationClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.list_instances("p").await.is_err());
        assert!(mock.list_instances("p").await.is_ok());
    }
}
