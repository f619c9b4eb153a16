use axum::{extract::State, http::StatusCode, Json};
use htmlblog_lib::{RefreshError, Stats};
use tracing::error;

use super::{blocking, SharedIndex};

pub async fn stats(State(index): State<SharedIndex>) -> Result<Json<Stats>, StatusCode> {
    let stats = blocking(index, |index| index.get_stats()).await?;

    Ok(Json(stats))
}

pub async fn refresh(State(index): State<SharedIndex>) -> Result<Json<Stats>, StatusCode> {
    let stats = blocking(index, |index| -> Result<Stats, RefreshError> {
        index.refresh()?;
        Ok(index.get_stats())
    })
    .await?
    .map_err(|err| {
        error!("Failed to refresh on request: {err}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(stats))
}
