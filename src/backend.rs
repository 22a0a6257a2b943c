//! HTTP client for the judicial-document search backend.
//!
//! Three operations, each a single attempt with no retries: keyword search,
//! similar-case search for an uploaded file, and document fetch. Failures
//! surface as [`ApiError`] and the views degrade to empty results; nothing
//! here is fatal.

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::{DocumentDetail, SearchPage, UploadedFile};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The upload was rejected before any network call was made.
    #[error("{0}")]
    InvalidUpload(String),
    /// The backend was unreachable or the transport failed.
    #[error("backend request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Server { status: StatusCode, message: String },
    /// No document matches the requested id.
    #[error("document not found")]
    NotFound,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    page: u32,
    size: usize,
}

/// POST /search - paginated keyword search.
pub async fn search_by_keyword(
    client: &reqwest::Client,
    config: &Config,
    text: &str,
    page: u32,
    size: usize,
) -> Result<SearchPage, ApiError> {
    let url = format!("{}/search", config.backend_url);

    let resp = client
        .post(&url)
        .json(&SearchRequest {
            query: text,
            page,
            size,
        })
        .send()
        .await?;

    let resp = error_for_status(resp).await?;
    Ok(resp.json::<SearchPage>().await?)
}

/// POST /upload_similar_cases - similar-case lookup for an uploaded case
/// file. The declared content type must be JSON; anything else is rejected
/// here, before the backend is contacted.
pub async fn search_by_similar_file(
    client: &reqwest::Client,
    config: &Config,
    file: &UploadedFile,
    page: u32,
    size: usize,
) -> Result<SearchPage, ApiError> {
    if file.content_type.as_deref() != Some("application/json") {
        return Err(ApiError::InvalidUpload(
            "请上传有效的 JSON 文件！".to_string(),
        ));
    }

    let url = format!(
        "{}/upload_similar_cases?page={page}&size={size}",
        config.backend_url
    );

    let part = reqwest::multipart::Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str("application/json")?;
    let form = reqwest::multipart::Form::new().part("file", part);

    let resp = client.post(&url).multipart(form).send().await?;
    let resp = error_for_status(resp).await?;
    Ok(resp.json::<SearchPage>().await?)
}

/// GET /document/{docId} - fetch one document for the detail view.
pub async fn fetch_document(
    client: &reqwest::Client,
    config: &Config,
    doc_id: &str,
) -> Result<DocumentDetail, ApiError> {
    let url = format!("{}/document/{}", config.backend_url, urlencoding::encode(doc_id));

    let resp = client.get(&url).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    let resp = error_for_status(resp).await?;
    Ok(resp.json::<DocumentDetail>().await?)
}

async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Server {
        status,
        message: extract_error_message(&body),
    })
}

/// The backend reports failures as `{"error": "..."}`; fall back to the raw
/// body for anything else.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
