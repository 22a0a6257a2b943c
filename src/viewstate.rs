//! Reconciliation state machine for the results view.
//!
//! Three sources of truth compete for the results page: the URL query
//! parameters (canonical for keyword searches), page-change requests, and a
//! one-shot upload seed handed over from the home page. The machine folds
//! them into a single authoritative `ViewState` by taking one [`Event`] at a
//! time and returning the follow-up [`Effect`]s for the driver to execute.
//!
//! ```text
//!               EnteredWithUpload(seed)
//!   ┌────────┐ ──────────────────────────▶ ┌────────────┐
//!   │  Idle   │                             │ UploadFile │
//!   └───┬────┘ ◀── UrlChanged(empty) ──┐   └────────────┘
//!       │                              │     (URL events ignored)
//!       │ UrlChanged(q, page)          │
//!       ▼                              │
//!   ┌────────┐  PageRequested(n) ──▶ UpdateUrl ──▶ UrlChanged(q, n)
//!   │ Keyword │
//!   └────────┘  FetchCompleted/FetchFailed settle results
//! ```
//!
//! The machine never performs I/O. Fetch completions carry the query they
//! were issued for and are applied only while that query is still the
//! in-flight intent; anything else is stale and dropped.

use crate::models::ResultItem;

/// Results per page, fixed by the backend contract.
pub const PAGE_SIZE: usize = 12;

/// Which search owns the current results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchType {
    #[default]
    None,
    Keyword,
    UploadFile,
}

/// A keyword search intent derived from the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub page: u32,
}

/// One-shot payload produced by a file upload, consumed exactly once on
/// entry into the results view.
#[derive(Debug, Clone)]
pub struct UploadSeed {
    pub results: Vec<ResultItem>,
    pub total: usize,
    pub file_name: String,
}

/// Inputs to the machine, one at a time.
#[derive(Debug, Clone)]
pub enum Event {
    /// The view was entered with a freshly consumed upload seed.
    EnteredWithUpload(UploadSeed),
    /// The URL's `q`/`page` parameters (re)settled.
    UrlChanged { query: String, page: u32 },
    /// The user asked for another page of the current keyword search.
    PageRequested(u32),
    /// A keyword fetch issued for `query` returned results.
    FetchCompleted {
        query: SearchQuery,
        results: Vec<ResultItem>,
        total: usize,
    },
    /// A keyword fetch issued for `query` failed.
    FetchFailed { query: SearchQuery },
}

/// Work the driver must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue a keyword search against the backend.
    FetchKeyword(SearchQuery),
    /// Rewrite the URL's query parameters (fires `UrlChanged` in turn).
    UpdateUrl { query: String, page: u32 },
    /// Return the viewport to the top of the page.
    ScrollToTop,
}

/// The reconciled, authoritative state behind the results render.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub search_type: SearchType,
    /// Current keyword intent; `None` outside `SearchType::Keyword`.
    pub query: Option<SearchQuery>,
    /// File name shown for upload-seeded results.
    pub uploaded_file_name: Option<String>,
    pub results: Vec<ResultItem>,
    pub total: usize,
    pub loading: bool,
    /// The query a pending fetch was issued for. Cleared by every
    /// transition that changes intent, so stale completions cannot match.
    in_flight: Option<SearchQuery>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event, returning the effects the driver must run.
    pub fn apply(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::EnteredWithUpload(seed) => {
                self.search_type = SearchType::UploadFile;
                self.results = seed.results;
                self.total = seed.total;
                self.uploaded_file_name = Some(seed.file_name);
                self.query = None;
                self.loading = false;
                self.in_flight = None;
                Vec::new()
            }

            Event::UrlChanged { query, page } => {
                // Upload results are not URL-addressed: an empty URL while
                // showing them means "no keyword intended", not "clear me".
                if self.search_type == SearchType::UploadFile {
                    return Vec::new();
                }

                let text = query.trim();
                if text.is_empty() {
                    self.reset_to_idle();
                    return Vec::new();
                }

                let next = SearchQuery {
                    text: text.to_string(),
                    page: page.max(1),
                };
                if self.search_type == SearchType::Keyword
                    && self.query.as_ref() == Some(&next)
                {
                    // Effective query unchanged, nothing to refetch.
                    return Vec::new();
                }

                self.search_type = SearchType::Keyword;
                self.query = Some(next.clone());
                self.uploaded_file_name = None;
                self.loading = true;
                self.in_flight = Some(next.clone());
                vec![Effect::FetchKeyword(next)]
            }

            Event::PageRequested(new_page) => match self.page_change_target(new_page) {
                Some(target) => vec![
                    Effect::UpdateUrl {
                        query: target.text,
                        page: target.page,
                    },
                    Effect::ScrollToTop,
                ],
                None => Vec::new(),
            },

            Event::FetchCompleted {
                query,
                results,
                total,
            } => {
                if self.in_flight.as_ref() != Some(&query) {
                    tracing::debug!(
                        "discarding stale results for '{}' page {}",
                        query.text,
                        query.page
                    );
                    return Vec::new();
                }
                self.results = results;
                self.total = total;
                self.loading = false;
                self.in_flight = None;
                Vec::new()
            }

            Event::FetchFailed { query } => {
                if self.in_flight.as_ref() != Some(&query) {
                    return Vec::new();
                }
                self.results.clear();
                self.total = 0;
                self.loading = false;
                self.in_flight = None;
                Vec::new()
            }
        }
    }

    /// Validate a page-change request against the current state, returning
    /// the query to navigate to. `None` means the request is a no-op: the
    /// machine is not showing a paginated keyword search, or the page is
    /// out of `1..=total_pages()`.
    pub fn page_change_target(&self, new_page: u32) -> Option<SearchQuery> {
        if self.search_type != SearchType::Keyword {
            return None;
        }
        let query = self.query.as_ref()?;
        if new_page < 1 || new_page > self.total_pages() {
            return None;
        }
        Some(SearchQuery {
            text: query.text.clone(),
            page: new_page,
        })
    }

    pub fn total_pages(&self) -> u32 {
        self.total.div_ceil(PAGE_SIZE) as u32
    }

    pub fn current_page(&self) -> u32 {
        self.query.as_ref().map(|q| q.page).unwrap_or(1)
    }

    fn reset_to_idle(&mut self) {
        self.search_type = SearchType::None;
        self.query = None;
        self.uploaded_file_name = None;
        self.results.clear();
        self.total = 0;
        self.loading = false;
        self.in_flight = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(doc_id: &str) -> ResultItem {
        ResultItem {
            doc_id: doc_id.to_string(),
            title: format!("<em>{doc_id}</em>"),
            abstract_snippet: "...".to_string(),
            tags: vec!["civil".to_string()],
        }
    }

    fn url_changed(query: &str, page: u32) -> Event {
        Event::UrlChanged {
            query: query.to_string(),
            page,
        }
    }

    fn completed(text: &str, page: u32, ids: &[&str], total: usize) -> Event {
        Event::FetchCompleted {
            query: SearchQuery {
                text: text.to_string(),
                page,
            },
            results: ids.iter().map(|id| item(id)).collect(),
            total,
        }
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = ViewState::new();
        assert_eq!(state.search_type, SearchType::None);
        assert!(state.results.is_empty());
        assert!(!state.loading);
    }

    #[test]
    fn test_url_with_keyword_issues_one_fetch() {
        let mut state = ViewState::new();
        let effects = state.apply(url_changed("合同纠纷", 2));
        assert_eq!(
            effects,
            vec![Effect::FetchKeyword(SearchQuery {
                text: "合同纠纷".to_string(),
                page: 2,
            })]
        );
        assert_eq!(state.search_type, SearchType::Keyword);
        assert!(state.loading);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_unchanged_url_does_not_refetch() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(completed("contract", 1, &["D1"], 1));
        let effects = state.apply(url_changed("contract", 1));
        assert!(effects.is_empty());
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn test_page_change_in_url_refetches() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(completed("contract", 1, &["D1"], 30));
        let effects = state.apply(url_changed("contract", 2));
        assert_eq!(
            effects,
            vec![Effect::FetchKeyword(SearchQuery {
                text: "contract".to_string(),
                page: 2,
            })]
        );
    }

    #[test]
    fn test_empty_query_resets_to_idle() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(completed("contract", 1, &["D1"], 1));
        let effects = state.apply(url_changed("", 1));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::None);
        assert!(state.results.is_empty());
        assert_eq!(state.total, 0);
    }

    #[test]
    fn test_whitespace_query_counts_as_empty() {
        let mut state = ViewState::new();
        let effects = state.apply(url_changed("   ", 1));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::None);
    }

    #[test]
    fn test_upload_entry_adopts_results_without_fetch() {
        let mut state = ViewState::new();
        let effects = state.apply(Event::EnteredWithUpload(UploadSeed {
            results: vec![item("D1"), item("D2")],
            total: 2,
            file_name: "case.json".to_string(),
        }));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::UploadFile);
        assert_eq!(state.total, 2);
        assert_eq!(state.uploaded_file_name.as_deref(), Some("case.json"));
        assert!(state.query.is_none());
    }

    #[test]
    fn test_upload_results_survive_url_events() {
        // Stripping the one-shot state leaves the URL empty; that must not
        // be mistaken for "no search intended".
        let mut state = ViewState::new();
        state.apply(Event::EnteredWithUpload(UploadSeed {
            results: vec![item("D1")],
            total: 1,
            file_name: "case.json".to_string(),
        }));
        let effects = state.apply(url_changed("", 1));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::UploadFile);
        assert_eq!(state.results.len(), 1);

        // A keyword URL is equally ignored while upload results are shown.
        let effects = state.apply(url_changed("contract", 1));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::UploadFile);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut state = ViewState::new();
        state.apply(url_changed("first", 1));
        state.apply(url_changed("second", 1));

        // The completion for the abandoned query arrives late.
        let effects = state.apply(completed("first", 1, &["STALE"], 99));
        assert!(effects.is_empty());
        assert!(state.results.is_empty());
        assert!(state.loading);

        // The completion matching current intent applies.
        state.apply(completed("second", 1, &["D1"], 1));
        assert_eq!(state.results[0].doc_id, "D1");
        assert_eq!(state.total, 1);
        assert!(!state.loading);
    }

    #[test]
    fn test_completion_after_reset_is_discarded() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(url_changed("", 1));
        let effects = state.apply(completed("contract", 1, &["STALE"], 5));
        assert!(effects.is_empty());
        assert_eq!(state.search_type, SearchType::None);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_completion_after_upload_entry_is_discarded() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(Event::EnteredWithUpload(UploadSeed {
            results: vec![item("U1")],
            total: 1,
            file_name: "case.json".to_string(),
        }));
        state.apply(completed("contract", 1, &["STALE"], 50));
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.results[0].doc_id, "U1");
        assert_eq!(state.total, 1);
    }

    #[test]
    fn test_fetch_failure_settles_to_zero_results() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(Event::FetchFailed {
            query: SearchQuery {
                text: "contract".to_string(),
                page: 1,
            },
        });
        assert!(state.results.is_empty());
        assert_eq!(state.total, 0);
        assert!(!state.loading);
        // The keyword intent itself is kept; only the results are empty.
        assert_eq!(state.search_type, SearchType::Keyword);
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = ViewState::new();
        state.apply(url_changed("first", 1));
        state.apply(url_changed("second", 1));
        state.apply(completed("second", 1, &["D1"], 1));
        state.apply(Event::FetchFailed {
            query: SearchQuery {
                text: "first".to_string(),
                page: 1,
            },
        });
        assert_eq!(state.results.len(), 1);
    }

    #[test]
    fn test_valid_page_request_updates_url_and_scrolls() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(completed("contract", 1, &["D1"], 25));
        let effects = state.apply(Event::PageRequested(2));
        assert_eq!(
            effects,
            vec![
                Effect::UpdateUrl {
                    query: "contract".to_string(),
                    page: 2,
                },
                Effect::ScrollToTop,
            ]
        );
    }

    #[test]
    fn test_out_of_range_page_request_is_noop() {
        let mut state = ViewState::new();
        state.apply(url_changed("contract", 1));
        state.apply(completed("contract", 1, &["D1"], 25)); // 3 pages
        assert!(state.apply(Event::PageRequested(0)).is_empty());
        assert!(state.apply(Event::PageRequested(4)).is_empty());
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_page_request_ignored_outside_keyword_search() {
        let mut state = ViewState::new();
        state.apply(Event::EnteredWithUpload(UploadSeed {
            results: vec![item("D1")],
            total: 40,
            file_name: "case.json".to_string(),
        }));
        assert!(state.apply(Event::PageRequested(2)).is_empty());

        let mut idle = ViewState::new();
        assert!(idle.apply(Event::PageRequested(1)).is_empty());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let mut state = ViewState::new();
        state.apply(url_changed("q", 1));
        state.apply(completed("q", 1, &[], 25));
        assert_eq!(state.total_pages(), 3);
        state.apply(url_changed("q", 2));
        state.apply(completed("q", 2, &[], 24));
        assert_eq!(state.total_pages(), 2);

        let empty = ViewState::new();
        assert_eq!(empty.total_pages(), 0);
    }

    #[test]
    fn test_page_parameter_below_one_is_clamped() {
        let mut state = ViewState::new();
        let effects = state.apply(url_changed("contract", 0));
        assert_eq!(
            effects,
            vec![Effect::FetchKeyword(SearchQuery {
                text: "contract".to_string(),
                page: 1,
            })]
        );
    }
}
