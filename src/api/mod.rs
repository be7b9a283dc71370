//! API layer: the service seam plus its HTTP implementation

pub mod http;
pub mod matching;
pub mod upload;

use crate::config::ApiConfig;
use crate::error::Result;
use async_trait::async_trait;
use http::HttpClient;
use matching::RecommendationResponse;
use serde_json::Value;
use std::path::Path;

/// The three backend operations the store depends on. Kept as a trait
/// so the store's state machine can be driven by a fake in tests.
#[async_trait]
pub trait MatchService {
    async fn upload_resume(&self, file: &Path) -> Result<Value>;

    async fn get_recommendations(
        &self,
        resume_file: &str,
        top_k: Option<u32>,
    ) -> Result<RecommendationResponse>;

    async fn get_match_report(&self, resume_file: &str, job_id: &str) -> Result<Value>;
}

/// Production [`MatchService`] backed by the shared HTTP client.
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }
}

#[async_trait]
impl MatchService for ApiClient {
    async fn upload_resume(&self, file: &Path) -> Result<Value> {
        upload::upload_resume(&self.http, file).await
    }

    async fn get_recommendations(
        &self,
        resume_file: &str,
        top_k: Option<u32>,
    ) -> Result<RecommendationResponse> {
        matching::get_recommendations(&self.http, resume_file, top_k).await
    }

    async fn get_match_report(&self, resume_file: &str, job_id: &str) -> Result<Value> {
        matching::get_match_report(&self.http, resume_file, job_id).await
    }
}
