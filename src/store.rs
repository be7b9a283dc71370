//! Session state store: resume descriptor, recommendations, report cache

use crate::api::matching::{Recommendation, RecommendationResponse};
use crate::api::MatchService;
use crate::error::{ApiFailure, MatchAgentError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// One independent flag per action, true only while that action's
/// request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadingFlags {
    pub upload: bool,
    pub recommendations: bool,
    pub report: bool,
}

/// Fields that survive across CLI invocations. Loading flags and the
/// error slot are per-process and never persisted.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionState {
    resume_payload: Option<Value>,
    recommendations: Vec<Recommendation>,
    recommendation_summary: String,
    report_cache: HashMap<String, Value>,
    #[serde(skip)]
    loading: LoadingFlags,
    #[serde(skip)]
    last_error: Option<ApiFailure>,
}

/// Owner of all client-side state, mutated only through its actions.
/// Each action follows the same protocol: raise the loading flag and
/// clear the error slot, await the service call, then write state on
/// success or record and re-raise the failure; the flag drops either
/// way. Precondition failures are recorded before any flag is raised.
///
/// Overlapping calls to the same action are not guarded; if callers
/// race, the last response to resolve wins.
pub struct SessionStore<S: MatchService> {
    service: S,
    state: SessionState,
}

impl<S: MatchService> SessionStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: SessionState::default(),
        }
    }

    /// Restores a persisted session, starting empty when no session
    /// file exists yet.
    pub fn load(service: S, path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            SessionState::default()
        };

        Ok(Self { service, state })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.state)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    // Getters

    pub fn has_resume(&self) -> bool {
        self.state.resume_payload.is_some()
    }

    pub fn resume_payload(&self) -> Option<&Value> {
        self.state.resume_payload.as_ref()
    }

    /// Derived resume file identifier: the last path segment of the
    /// descriptor's `json_file` field. `None` unless a descriptor with
    /// a non-empty `json_file` is present.
    pub fn resume_file(&self) -> Option<String> {
        derive_resume_file(self.state.resume_payload.as_ref())
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.state.recommendations
    }

    pub fn recommendation_summary(&self) -> &str {
        &self.state.recommendation_summary
    }

    pub fn cached_report(&self, job_id: &str) -> Option<&Value> {
        self.state.report_cache.get(job_id)
    }

    pub fn report_cache_len(&self) -> usize {
        self.state.report_cache.len()
    }

    pub fn loading(&self) -> &LoadingFlags {
        &self.state.loading
    }

    pub fn last_error(&self) -> Option<&ApiFailure> {
        self.state.last_error.as_ref()
    }

    // Actions

    /// Uploads a resume and shallow-merges the returned descriptor into
    /// the current one. Returns the merged descriptor.
    pub async fn upload(&mut self, file: &Path) -> Result<Value> {
        self.state.loading.upload = true;
        self.state.last_error = None;

        let result = self.service.upload_resume(file).await;
        self.state.loading.upload = false;

        match result {
            Ok(payload) => {
                merge_payload(&mut self.state.resume_payload, payload);
                info!("Resume uploaded, file id: {:?}", self.resume_file());
                Ok(self
                    .state
                    .resume_payload
                    .clone()
                    .unwrap_or(Value::Null))
            }
            Err(error) => Err(self.record(error)),
        }
    }

    /// Replaces the recommendation list and summary wholesale. On
    /// failure both are cleared before the error is re-raised.
    pub async fn fetch_recommendations(
        &mut self,
        top_k: Option<u32>,
    ) -> Result<RecommendationResponse> {
        let Some(resume_file) = self.resume_file() else {
            return Err(self.record(MatchAgentError::ResumeNotAvailable));
        };

        self.state.loading.recommendations = true;
        self.state.last_error = None;

        let result = self.service.get_recommendations(&resume_file, top_k).await;
        self.state.loading.recommendations = false;

        match result {
            Ok(response) => {
                self.state.recommendations = response.recommendations.clone();
                self.state.recommendation_summary = response.summary.clone();
                Ok(response)
            }
            Err(error) => {
                self.state.recommendations.clear();
                self.state.recommendation_summary.clear();
                Err(self.record(error))
            }
        }
    }

    /// Read-through cached report fetch. A cache hit returns the stored
    /// payload with no network call and no loading-flag transition;
    /// entries are only ever dropped by [`reset`](Self::reset).
    pub async fn fetch_report(&mut self, job_id: &str) -> Result<Value> {
        let Some(resume_file) = self.resume_file() else {
            return Err(self.record(MatchAgentError::ResumeNotAvailable));
        };
        if job_id.is_empty() {
            return Err(self.record(MatchAgentError::MissingJobId));
        }

        if let Some(cached) = self.state.report_cache.get(job_id) {
            debug!("Report cache hit for job {}", job_id);
            return Ok(cached.clone());
        }

        self.state.loading.report = true;
        self.state.last_error = None;

        let result = self.service.get_match_report(&resume_file, job_id).await;
        self.state.loading.report = false;

        match result {
            Ok(report) => {
                self.state
                    .report_cache
                    .insert(job_id.to_string(), report.clone());
                Ok(report)
            }
            Err(error) => Err(self.record(error)),
        }
    }

    /// Restores every field to its initial empty value, discarding the
    /// report cache entirely.
    pub fn reset(&mut self) {
        self.state = SessionState::default();
    }

    fn record(&mut self, error: MatchAgentError) -> MatchAgentError {
        self.state.last_error = Some(error.failure());
        error
    }
}

/// Shallow reconciliation of a server descriptor into the stored one:
/// incoming fields overwrite existing ones, untouched fields survive.
/// A null payload is ignored; a non-object payload replaces the slot.
fn merge_payload(slot: &mut Option<Value>, incoming: Value) {
    if incoming.is_null() {
        return;
    }

    match (slot.as_mut(), incoming) {
        (Some(Value::Object(existing)), Value::Object(incoming)) => {
            for (key, value) in incoming {
                existing.insert(key, value);
            }
        }
        (_, incoming) => *slot = Some(incoming),
    }
}

fn derive_resume_file(payload: Option<&Value>) -> Option<String> {
    let path = payload?.get("json_file")?.as_str()?;
    if path.is_empty() {
        return None;
    }

    let segment = path
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(path);

    Some(segment.to_string())
}
