use axum::extract::{Multipart, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::backend::{self, ApiError};
use crate::models::UploadedFile;
use crate::state::AppState;
use crate::templates;
use crate::viewstate::{UploadSeed, PAGE_SIZE};

/// GET / - home page with the keyword and upload forms.
pub async fn home_page() -> Html<String> {
    Html(templates::home_page(None))
}

#[derive(Debug, Deserialize)]
pub struct KeywordForm {
    #[serde(default)]
    pub q: String,
}

/// POST /search - keyword submit. Empty or whitespace-only input goes
/// straight back home without contacting the backend; the results view
/// owns the fetch, keyed off the URL it is redirected to.
pub async fn submit_keyword(Form(form): Form<KeywordForm>) -> Redirect {
    let query = form.q.trim();
    if query.is_empty() {
        return Redirect::to("/");
    }
    Redirect::to(&templates::results_href(query, 1))
}

/// POST /upload - similar-case search for an uploaded file. Validation
/// failures and backend errors re-render the home page with the alert
/// message; success stores a one-shot seed and redirects into the results
/// view carrying its token.
pub async fn upload_and_search(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, Html<String>> {
    let file = match read_upload(multipart).await {
        Some(file) => file,
        None => {
            return Err(Html(templates::home_page(Some(
                "请先选择一个案例文件！",
            ))))
        }
    };

    let page = match backend::search_by_similar_file(
        &state.http_client,
        &state.config,
        &file,
        1,
        PAGE_SIZE,
    )
    .await
    {
        Ok(page) => page,
        Err(err @ ApiError::InvalidUpload(_)) => {
            return Err(Html(templates::home_page(Some(&err.to_string()))));
        }
        Err(err) => {
            tracing::error!("similar-case search failed for '{}': {err}", file.file_name);
            return Err(Html(templates::home_page(Some(&format!(
                "上传文件查找相似案例出错: {err}"
            )))));
        }
    };

    tracing::info!(
        "similar-case search for '{}' matched {} documents",
        file.file_name,
        page.total
    );

    let token = state.seeds.put(UploadSeed {
        results: page.results,
        total: page.total,
        file_name: file.file_name,
    });
    Ok(Redirect::to(&format!("/results?seed={token}")))
}

/// Pull the `file` field out of the multipart body. `None` means no usable
/// file was selected.
async fn read_upload(mut multipart: Multipart) -> Option<UploadedFile> {
    while let Some(field) = multipart.next_field().await.ok()? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.ok()?.to_vec();
        if file_name.is_empty() && bytes.is_empty() {
            return None;
        }
        return Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    None
}
