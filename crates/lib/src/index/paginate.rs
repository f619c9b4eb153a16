use serde::Serialize;

use crate::post::BlogPost;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<usize>,
    pub prev_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginated {
    pub items: Vec<BlogPost>,
    pub pagination: PageInfo,
}

/// Slices out the 1-based `page`. Page 0 reads as page 1; a page past the
/// end is kept as requested and comes back empty.
pub(crate) fn paginate(posts: &[BlogPost], page: usize, per_page: usize) -> Paginated {
    let per_page = per_page.max(1);
    let total_items = posts.len();
    let total_pages = total_items.div_ceil(per_page);
    let current_page = page.max(1);

    let start = (current_page - 1).saturating_mul(per_page);
    let items = posts.iter().skip(start).take(per_page).cloned().collect();

    let has_next = current_page < total_pages;
    let has_prev = current_page > 1;

    Paginated {
        items,
        pagination: PageInfo {
            current_page,
            total_pages,
            total_items,
            per_page,
            has_next,
            has_prev,
            next_page: has_next.then(|| current_page + 1),
            prev_page: has_prev.then(|| current_page - 1),
        },
    }
}
