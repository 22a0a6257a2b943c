use axum::extract::{Path, State};
use axum::response::Html;

use crate::backend::{self, ApiError};
use crate::state::AppState;
use crate::templates;

/// GET /detail/{doc_id} - fetch one document and render it. Every failure
/// degrades to the not-found placeholder; only genuine backend errors are
/// logged.
pub async fn detail_page(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Html<String> {
    match backend::fetch_document(&state.http_client, &state.config, &doc_id).await {
        Ok(detail) => Html(templates::detail_page(&detail)),
        Err(ApiError::NotFound) => Html(templates::detail_not_found()),
        Err(err) => {
            tracing::error!("document fetch for '{doc_id}' failed: {err}");
            Html(templates::detail_not_found())
        }
    }
}
