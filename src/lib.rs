//! # case-search
//!
//! Web client for keyword search and file-based similar-case lookup over a
//! judicial-document backend. The backend owns indexing, ranking, and
//! document storage; this crate is the browser-facing shell that talks to
//! it over HTTP and renders the three views (home, results, detail).
//!
//! The heart of the crate is the results reconciliation machine: the
//! results view has three competing sources of truth (URL query
//! parameters, page-change requests, and a one-shot upload seed), and
//! [`viewstate`] folds them into a single authoritative state:
//!
//! ```text
//!   URL (?q=&page=) ──┐
//!   page requests ────┼──▶ ViewState::apply ──▶ {results, total,
//!   upload seed ──────┘        │                 searchType, page}
//!                              ▼
//!                      Effect::FetchKeyword ──▶ backend ──▶ FetchCompleted
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration: backend origin, bind
//!   address, outbound timeouts
//! - [`models`] - Wire types of the backend contract: `ResultItem`,
//!   `SearchPage`, `DocumentDetail`
//! - [`backend`] - The API client: keyword search, similar-file search,
//!   document fetch, and the `ApiError` taxonomy
//! - [`viewstate`] - The results reconciliation state machine
//! - [`seed`] - One-shot handoff of upload results into the results view
//! - [`templates`] - HTML rendering, escaping, and the raw-HTML trust
//!   boundary
//! - [`views`] - Axum handlers for the home, results, and detail routes
//! - [`state`] - Shared application state: config, HTTP client, seed store

pub mod backend;
pub mod config;
pub mod models;
pub mod seed;
pub mod state;
pub mod templates;
pub mod views;
pub mod viewstate;
