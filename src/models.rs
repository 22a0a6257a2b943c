use serde::{Deserialize, Serialize};

/// A single search hit as returned by the backend.
///
/// `title` and `abstract_snippet` carry the backend highlighter's `<em>`
/// markup and are rendered verbatim; the backend owns sanitization of these
/// fields. Fields the backend also returns but the client never renders
/// (`ajId`, `score`, the full `abstract`/`content`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(rename = "docId")]
    pub doc_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub abstract_snippet: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<ResultItem>,
    #[serde(default)]
    pub total: usize,
}

/// Full document payload for the detail view. Every field is an HTML string
/// owned and sanitized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentDetail {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub result: String,
}

/// A file received from the browser, before any validation.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    /// Content type as declared by the browser for the multipart field.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
