use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use htmlblog_lib::{BlogPost, Paginated};

use super::{blocking, parse_param, SharedIndex};

const DEFAULT_RECENT: usize = 5;

fn assign_headers(post_count: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert("x-length", post_count.into());

    headers
}

pub async fn all(
    State(index): State<SharedIndex>,
) -> Result<(HeaderMap, Json<Vec<BlogPost>>), StatusCode> {
    let posts = blocking(index, |index| index.get_all()).await?;

    Ok((assign_headers(posts.len()), Json(posts)))
}

pub async fn by_year(
    State(index): State<SharedIndex>,
    Path(year): Path<i32>,
) -> Result<(HeaderMap, Json<Vec<BlogPost>>), StatusCode> {
    let posts = blocking(index, move |index| index.get_by_year(year)).await?;

    Ok((assign_headers(posts.len()), Json(posts)))
}

pub async fn by_year_month(
    State(index): State<SharedIndex>,
    Path((year, month)): Path<(i32, u32)>,
) -> Result<(HeaderMap, Json<Vec<BlogPost>>), StatusCode> {
    let posts = blocking(index, move |index| index.get_by_year_month(year, month)).await?;

    Ok((assign_headers(posts.len()), Json(posts)))
}

pub async fn recent(
    State(index): State<SharedIndex>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<BlogPost>>, StatusCode> {
    let count = parse_param(&params, "count")?.unwrap_or(DEFAULT_RECENT);

    let posts = blocking(index, move |index| index.get_recent(count)).await?;

    Ok(Json(posts))
}

pub async fn page(
    State(index): State<SharedIndex>,
    Path(page): Path<usize>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Paginated>, StatusCode> {
    let per_page = parse_param(&params, "perPage")?;

    let page = blocking(index, move |index| index.get_paginated(page, per_page)).await?;

    Ok(Json(page))
}
