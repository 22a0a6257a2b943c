use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use uuid::Uuid;

use crate::backend;
use crate::state::AppState;
use crate::templates;
use crate::viewstate::{Effect, Event, ViewState, PAGE_SIZE};

#[derive(Debug, Default, Deserialize)]
pub struct ResultsParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<u32>,
    /// One-shot upload seed token, present only on the redirect that
    /// immediately follows an upload search.
    #[serde(default)]
    pub seed: Option<String>,
}

/// GET /results - reconcile seed and URL state, fetch when the effective
/// query changed, render the settled view.
pub async fn results_page(
    State(state): State<AppState>,
    Query(params): Query<ResultsParams>,
) -> Html<String> {
    let mut view = ViewState::new();

    // A consumed, expired, or malformed token falls through to URL state:
    // the one-shot payload is treated as already read.
    let seed = params
        .seed
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .and_then(|token| state.seeds.take(token));

    let mut effects = match seed {
        Some(seed) => view.apply(Event::EnteredWithUpload(seed)),
        None => view.apply(Event::UrlChanged {
            query: params.q.clone().unwrap_or_default(),
            page: params.page.unwrap_or(1),
        }),
    };

    while let Some(effect) = effects.pop() {
        match effect {
            Effect::FetchKeyword(query) => {
                let outcome = backend::search_by_keyword(
                    &state.http_client,
                    &state.config,
                    &query.text,
                    query.page,
                    PAGE_SIZE,
                )
                .await;
                let event = match outcome {
                    Ok(page) => {
                        tracing::info!(
                            "keyword search '{}' page {} matched {} documents",
                            query.text,
                            query.page,
                            page.total
                        );
                        Event::FetchCompleted {
                            query,
                            results: page.results,
                            total: page.total,
                        }
                    }
                    Err(err) => {
                        tracing::error!(
                            "keyword search '{}' page {} failed: {err}",
                            query.text,
                            query.page
                        );
                        Event::FetchFailed { query }
                    }
                };
                effects.extend(view.apply(event));
            }
            // URL rewrites and scrolling are browser concerns; a rendered
            // navigation already lands on the new URL at the top.
            Effect::UpdateUrl { .. } | Effect::ScrollToTop => {}
        }
    }

    Html(templates::results_page(&view))
}
