//! HTTP wrapper around reqwest with uniform failure normalization

use crate::config::ApiConfig;
use crate::error::{ApiFailure, MatchAgentError, Result};
use log::debug;
use reqwest::multipart::Form;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Shared client for all backend calls. Base URL and timeout come from
/// [`ApiConfig`]; every failure leaving this type is already reduced to
/// the normalized [`ApiFailure`] shape.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                MatchAgentError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {} with {} query parameters", path, query.len());
        let request = self.client.get(self.url(path)).query(query);
        self.execute(request).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        debug!("POST {} (multipart)", path);
        let request = self.client.post(self.url(path)).multipart(form);
        self.execute(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(transport_failure)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_failure)?;

        if !(200..300).contains(&status) {
            return Err(MatchAgentError::Api(response_failure(status, &body)));
        }

        serde_json::from_str(&body).map_err(|e| {
            MatchAgentError::Api(ApiFailure {
                message: format!("Invalid response body: {}", e),
                status: Some(status),
                data: None,
            })
        })
    }
}

fn transport_failure(error: reqwest::Error) -> MatchAgentError {
    MatchAgentError::Api(ApiFailure {
        message: error.to_string(),
        status: error.status().map(|s| s.as_u16()),
        data: None,
    })
}

/// Builds the normalized failure for a non-2xx response, preferring the
/// server's `detail` field as the message.
fn response_failure(status: u16, body: &str) -> ApiFailure {
    let data: Option<Value> = serde_json::from_str(body).ok();

    let message = data
        .as_ref()
        .and_then(|value| value.get("detail"))
        .and_then(|detail| detail.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    ApiFailure {
        message,
        status: Some(status),
        data,
    }
}
