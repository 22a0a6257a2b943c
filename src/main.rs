use axum::http::header;
use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use case_search::config::Config;
use case_search::state::AppState;
use case_search::{templates, views};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("Search backend: {}", config.backend_url);

    let state = AppState::new(config.clone())?;

    let app = Router::new()
        .route("/", get(views::home::home_page))
        .route("/search", post(views::home::submit_keyword))
        .route("/upload", post(views::home::upload_and_search))
        .route("/results", get(views::results::results_page))
        .route("/detail/{doc_id}", get(views::detail::detail_page))
        .route("/static/style.css", get(serve_css))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_css() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        templates::CSS,
    )
}
