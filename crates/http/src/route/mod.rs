pub mod maintenance;
pub mod post;
pub mod posts;
pub mod search;

use std::{collections::HashMap, str::FromStr, sync::Arc};

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use htmlblog_lib::BlogIndex;
use tracing::error;

pub type SharedIndex = Arc<BlogIndex>;

pub fn router(index: SharedIndex) -> Router {
    Router::new()
        .route("/api/posts", get(posts::all))
        .route("/api/posts/:year", get(posts::by_year))
        .route("/api/posts/:year/:month", get(posts::by_year_month))
        .route("/api/posts/:year/:month/:day", get(post::by_date))
        .route("/api/by-date", post(post::by_date_key))
        .route("/api/post/:slug", get(post::by_slug))
        .route("/api/recent", get(posts::recent))
        .route("/api/page/:page", get(posts::page))
        .route("/api/search", get(search::get))
        .route("/api/stats", get(maintenance::stats))
        .route("/api/refresh", post(maintenance::refresh))
        .with_state(index)
}

fn parse_param<T: FromStr>(
    params: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, StatusCode> {
    params
        .get(key)
        .map(|x| x.parse())
        .transpose()
        .map_err(|_| StatusCode::BAD_REQUEST)
}

/// Runs `f` against the index on tokio's blocking pool, since refreshing
/// and reading posts touch the filesystem.
async fn blocking<T, F>(index: SharedIndex, f: F) -> Result<T, StatusCode>
where
    T: Send + 'static,
    F: FnOnce(&BlogIndex) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&index))
        .await
        .map_err(|err| {
            error!("Index task failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
