//! The in-memory blog index.
//!
//! [`BlogIndex::refresh`] rebuilds the whole collection from the source
//! directory and publishes it with a single pointer swap, so readers see
//! either the old collection or the new one. Every read hands out owned
//! copies.

mod paginate;

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::{
    config::{BlogConfig, SortOrder},
    date::{is_valid_date, DateKey},
    fs::{self, HTML_EXTENSIONS},
    post::BlogPost,
};

pub use paginate::{PageInfo, Paginated};

#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to list source directory ({path}): {source}")]
    ListDirectory {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Desc,
    Content,
}

impl SearchField {
    pub const DEFAULT: [SearchField; 2] = [SearchField::Title, SearchField::Desc];
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Desc, SearchField::Content];

    fn text(self, post: &BlogPost) -> &str {
        match self {
            SearchField::Title => &post.title,
            SearchField::Desc => &post.desc,
            SearchField::Content => &post.content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_posts: usize,
    pub last_refreshed: Option<DateTime<Utc>>,
    pub oldest_post: Option<String>,
    pub newest_post: Option<String>,
}

fn sort_posts(posts: &mut [BlogPost], order: SortOrder) {
    match order {
        SortOrder::Asc => posts.sort_by(|a, b| a.date.cmp(&b.date)),
        SortOrder::Desc => posts.sort_by(|a, b| b.date.cmp(&a.date)),
    }
}

pub struct BlogIndex {
    config: BlogConfig,
    posts: ArcSwap<Vec<BlogPost>>,
    refreshing: Mutex<()>,
    last_refreshed: Mutex<Option<DateTime<Utc>>>,
}

impl BlogIndex {
    /// Creates an empty index; posts are loaded on the first read or
    /// [`BlogIndex::refresh`].
    #[must_use]
    pub fn new(config: BlogConfig) -> Self {
        BlogIndex {
            config,
            posts: ArcSwap::from_pointee(Vec::new()),
            refreshing: Mutex::new(()),
            last_refreshed: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BlogConfig {
        &self.config
    }

    fn load(&self, dir: &Utf8Path) -> Result<Vec<BlogPost>, RefreshError> {
        let paths = fs::filepaths_with_extensions(dir, HTML_EXTENSIONS).map_err(|source| {
            RefreshError::ListDirectory {
                path: dir.to_owned(),
                source,
            }
        })?;

        let mut posts = paths
            .iter()
            .filter_map(
                |path| match BlogPost::read_from_path(path, self.config.metadata_format) {
                    Ok(post) => Some(post),
                    Err(err) => {
                        warn!("Couldn't load blog post ({path}): {err}");
                        None
                    }
                },
            )
            .filter(|post| {
                let valid = is_valid_date(&post.date);
                if !valid {
                    trace!("Skipping {} with date {:?}", post.file_path, post.date);
                }
                valid
            })
            .collect::<Vec<_>>();

        sort_posts(&mut posts, self.config.sort_order);

        Ok(posts)
    }

    /// Rebuilds the collection from the source directory and returns how many
    /// posts it now holds. A missing directory yields an empty collection.
    pub fn refresh(&self) -> Result<usize, RefreshError> {
        let _refreshing = self
            .refreshing
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let dir = &self.config.source_directory;
        let posts = if dir.exists() {
            self.load(dir)?
        } else {
            warn!("Blog source directory ({dir}) does not exist, serving no posts");
            Vec::new()
        };

        let count = posts.len();
        self.posts.store(Arc::new(posts));
        *self
            .last_refreshed
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());

        info!("Indexed {count} blog posts from {dir}");
        Ok(count)
    }

    fn snapshot(&self) -> Arc<Vec<BlogPost>> {
        if !self.config.cache_enabled || self.posts.load().is_empty() {
            debug!("Refreshing blog index on read");
            if let Err(err) = self.refresh() {
                error!("Failed to refresh blog index: {err}");
            }
        }
        self.posts.load_full()
    }

    fn filtered(&self, predicate: impl Fn(&BlogPost) -> bool) -> Vec<BlogPost> {
        self.snapshot()
            .iter()
            .filter(|post| predicate(post))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn get_all(&self) -> Vec<BlogPost> {
        self.snapshot().as_ref().clone()
    }

    /// Finds the first post on the given day. Keys that can't be read as a
    /// date find nothing.
    pub fn get_by_date(&self, key: impl Into<DateKey>) -> Option<BlogPost> {
        let ymd = key.into().ymd()?;
        self.snapshot()
            .iter()
            .find(|post| post.ymd() == Some(ymd))
            .cloned()
    }

    #[must_use]
    pub fn get_recent(&self, count: usize) -> Vec<BlogPost> {
        self.snapshot().iter().take(count).cloned().collect()
    }

    #[must_use]
    pub fn get_by_slug(&self, slug: &str) -> Option<BlogPost> {
        self.snapshot()
            .iter()
            .find(|post| post.slug == slug)
            .cloned()
    }

    #[must_use]
    pub fn get_by_year(&self, year: i32) -> Vec<BlogPost> {
        self.filtered(|post| post.ymd().is_some_and(|(y, _, _)| y == year))
    }

    #[must_use]
    pub fn get_by_year_month(&self, year: i32, month: u32) -> Vec<BlogPost> {
        self.filtered(|post| post.ymd().is_some_and(|(y, m, _)| y == year && m == month))
    }

    /// One page of posts. `per_page` falls back to the configured default
    /// when absent or zero.
    #[must_use]
    pub fn get_paginated(&self, page: usize, per_page: Option<usize>) -> Paginated {
        let per_page = per_page
            .filter(|n| *n > 0)
            .unwrap_or(self.config.default_per_page);
        paginate::paginate(&self.snapshot(), page, per_page)
    }

    /// Case-insensitive search across title, description and raw content.
    #[must_use]
    pub fn search(&self, keyword: &str) -> Vec<BlogPost> {
        self.search_fields(keyword, &SearchField::ALL)
    }

    #[must_use]
    pub fn search_fields(&self, keyword: &str, fields: &[SearchField]) -> Vec<BlogPost> {
        let needle = keyword.to_lowercase();
        self.filtered(|post| {
            fields
                .iter()
                .any(|field| field.text(post).to_lowercase().contains(&needle))
        })
    }

    #[must_use]
    pub fn get_stats(&self) -> Stats {
        let posts = self.snapshot();
        let first = posts.first().map(|post| post.date.clone());
        let last = posts.last().map(|post| post.date.clone());
        let (oldest_post, newest_post) = match self.config.sort_order {
            SortOrder::Asc => (first, last),
            SortOrder::Desc => (last, first),
        };
        Stats {
            total_posts: posts.len(),
            last_refreshed: *self
                .last_refreshed
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            oldest_post,
            newest_post,
        }
    }
}
