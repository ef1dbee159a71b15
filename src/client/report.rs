//! HTTP client for the report server

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

use super::AllocationApi;
use crate::allocation::Instance;
use crate::error::{ApiError, Result};
use crate::route;

/// Request timeout for report downloads
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Report server client
pub struct ReportClient {
    http: HttpClient,
    base_url: String,
}

impl ReportClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("cloudeff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<T>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(path.to_string()).into()),
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .ok()
                    .filter(|body| !body.trim().is_empty())
                    .unwrap_or_else(|| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl AllocationApi for ReportClient {
    async fn list_instances(&self, time_period: &str) -> Result<Vec<Instance>> {
        let instances: Vec<Instance> = self.get_json(&route::instances_path(time_period)).await?;
        log::debug!("Fetched {} instances for {}", instances.len(), time_period);
        Ok(instances)
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_client_creation_trims_slash() {
        let client = ReportClient::new("https://reports.example.com/").unwrap();
        assert_eq!(client.host(), "https://reports.example.com");
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_list_instances_ok() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/2018-10-01/public/allInstances.json")
            .with_status(200)
            .with_body(r#"[{"instance_id": "i-1", "owners": ["alice"], "waste": 3.0}]"#)
            .create_async()
            .await;

        let client = ReportClient::new(&server.url()).unwrap();
        let instances = client.list_instances("2018-10-01").await.unwrap();

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].owners, vec!["alice"]);
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_list_instances_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing/public/allInstances.json")
            .with_status(404)
            .create_async()
            .await;

        let client = ReportClient::new(&server.url()).unwrap();
        let err = client.list_instances("missing").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::NotFound(_))));
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_list_instances_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/p/public/allInstances.json")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = ReportClient::new(&server.url()).unwrap();
        let err = client.list_instances("p").await.unwrap_err();

        assert!(err.to_string().contains("maintenance"));
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_list_instances_bad_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/p/public/allInstances.json")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let client = ReportClient::new(&server.url()).unwrap();
        let err = client.list_instances("p").await.unwrap_err();

        assert!(matches!(err, Error::Api(ApiError::InvalidResponse(_))));
    }
}
