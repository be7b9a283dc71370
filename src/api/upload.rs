//! Multipart resume upload

use crate::api::http::HttpClient;
use crate::error::{MatchAgentError, Result};
use log::info;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;

/// Uploads a resume file for parsing. Rejects with `INVALID_FILE`
/// before any network call unless the path is an existing regular file.
/// The response payload carries at least `json_file`, the server-side
/// path of the extracted resume JSON.
pub async fn upload_resume(http: &HttpClient, file: &Path) -> Result<Value> {
    if !file.is_file() {
        return Err(MatchAgentError::InvalidFile);
    }

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or(MatchAgentError::InvalidFile)?;

    info!("Uploading resume: {}", file.display());

    let bytes = tokio::fs::read(file).await?;
    let part = Part::bytes(bytes).file_name(file_name);
    let form = Form::new().part("file", part);

    http.post_multipart("/resume/upload", form).await
}
