use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use htmlblog_lib::BlogPost;
use tracing::debug;

use super::{blocking, SharedIndex};

pub async fn get(
    State(index): State<SharedIndex>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<BlogPost>>, StatusCode> {
    let keyword = params.get("q").ok_or(StatusCode::BAD_REQUEST)?;

    let posts = blocking(index, {
        let keyword = keyword.clone();
        move |index| index.search(&keyword)
    })
    .await?;
    debug!("Search for {keyword:?} matched {} posts", posts.len());

    Ok(Json(posts))
}
