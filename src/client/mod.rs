//! Report server API client

use async_trait::async_trait;

use crate::allocation::Instance;
use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod report;

#[cfg(test)]
pub use mock::MockAllocationClient;
pub use report::ReportClient;

/// Read access to the published allocation reports
#[async_trait]
pub trait AllocationApi: Send + Sync {
    /// Fetch the full instance list for a reporting period.
    ///
    /// One request, no pagination, no retry.
    async fn list_instances(&self, time_period: &str) -> Result<Vec<Instance>>;

    /// Base URL requests are made against, used for cache keys
    fn host(&self) -> &str;
}
