//! Recommendation and match report calls against the matching backend

use crate::api::http::HttpClient;
use crate::error::{MatchAgentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recommended job posting. Only the similarity score is guaranteed;
/// the backend omits metadata fields it has no value for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub score: f64,
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub deadline: Option<String>,
    pub snippet: Option<String>,
}

/// Response of `GET /match/auto`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub resume_name: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub summary: String,
}

/// Fetches ranked job recommendations for an uploaded resume. Rejects
/// with `MISSING_RESUME_FILE` before any network call when the resume
/// file identifier is empty. `top_k` is only sent when non-zero.
pub async fn get_recommendations(
    http: &HttpClient,
    resume_file: &str,
    top_k: Option<u32>,
) -> Result<RecommendationResponse> {
    if resume_file.is_empty() {
        return Err(MatchAgentError::MissingResumeFile);
    }

    let mut query = vec![("resume_file", resume_file.to_string())];
    if let Some(top_k) = top_k.filter(|k| *k > 0) {
        query.push(("top_k", top_k.to_string()));
    }

    http.get("/match/auto", &query).await
}

/// Fetches the detailed match report for one job posting. The report is
/// treated as an opaque payload and cached verbatim by the store.
pub async fn get_match_report(
    http: &HttpClient,
    resume_file: &str,
    job_id: &str,
) -> Result<Value> {
    if resume_file.is_empty() || job_id.is_empty() {
        return Err(MatchAgentError::MissingReportParams);
    }

    let query = [
        ("resume_file", resume_file.to_string()),
        ("job_id", job_id.to_string()),
    ];

    http.get("/match/single", &query).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn offline_client() -> HttpClient {
        // Validation fires before any request, so the target never matters.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 1000,
        };
        HttpClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_recommendations_reject_empty_resume_file() {
        let result = get_recommendations(&offline_client(), "", Some(5)).await;

        assert!(matches!(result, Err(MatchAgentError::MissingResumeFile)));
    }

    #[tokio::test]
    async fn test_report_rejects_empty_job_id() {
        let result = get_match_report(&offline_client(), "r.json", "").await;

        assert!(matches!(result, Err(MatchAgentError::MissingReportParams)));
    }

    #[tokio::test]
    async fn test_report_rejects_empty_resume_file() {
        let result = get_match_report(&offline_client(), "", "job-1").await;

        assert!(matches!(result, Err(MatchAgentError::MissingReportParams)));
    }

    #[test]
    fn test_recommendation_response_defaults() {
        let response: RecommendationResponse = serde_json::from_str("{}").unwrap();

        assert!(response.recommendations.is_empty());
        assert!(response.summary.is_empty());
        assert!(response.resume_name.is_none());
    }

    #[test]
    fn test_recommendation_parses_backend_shape() {
        let raw = serde_json::json!({
            "resume_name": "Jane Doe",
            "recommendations": [{
                "score": 0.8731,
                "job_id": "job-42",
                "title": "Backend Engineer",
                "company": "Acme",
                "location": null,
                "deadline": null,
                "snippet": "Build services"
            }],
            "summary": "One strong match."
        });
        let response: RecommendationResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(response.recommendations.len(), 1);
        let first = &response.recommendations[0];
        assert_eq!(first.job_id.as_deref(), Some("job-42"));
        assert!(first.location.is_none());
        assert_eq!(response.summary, "One strong match.");
    }
}
