use crate::core::error::{ClimaError, Service};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// Shared HTTP plumbing for one service endpoint.
#[derive(Clone)]
pub struct BaseApiClient {
    service: Service,
    endpoint: String,
    client: Client,
}

impl BaseApiClient {
    pub fn new(
        service: Service,
        endpoint: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, ClimaError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClimaError::Config(format!("HTTP client for {}: {}", service, e)))?;

        Ok(Self {
            service,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, ClimaError> {
        self.client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| ClimaError::request(self.service, e))
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        api_key: &str,
        payload: &T,
    ) -> Result<Response, ClimaError> {
        self.client
            .post(self.url(path))
            .bearer_auth(api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| ClimaError::request(self.service, e))
    }

    /// Reads the whole body as text, classifying read failures as transport errors.
    pub async fn read_body(&self, response: Response) -> Result<String, ClimaError> {
        response
            .text()
            .await
            .map_err(|e| ClimaError::request(self.service, e))
    }
}
