//! Search and pagination over a loaded collection.

use crate::models::requests::{DEFAULT_ITEMS_PER_PAGE, DEFAULT_PAGE};
use crate::models::{Item, PageResponse, PaginationMeta};

// == Search ==
/// Case-insensitive substring match on name, category or description.
///
/// A blank query matches everything.
pub fn search_items<'a>(items: &'a [Item], query: Option<&str>) -> Vec<&'a Item> {
    let term = query.map(|q| q.trim().to_lowercase()).unwrap_or_default();
    if term.is_empty() {
        return items.iter().collect();
    }

    items
        .iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&term)
                || item.category.to_lowercase().contains(&term)
                || item
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
        .collect()
}

// == Paginate ==
/// Slices one 1-based page out of `items`.
///
/// A zero `page` or `per_page` falls back to the defaults; a page past the
/// end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageResponse<T> {
    let page = if page == 0 { DEFAULT_PAGE } else { page };
    let per_page = if per_page == 0 {
        DEFAULT_ITEMS_PER_PAGE
    } else {
        per_page
    };

    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    PageResponse {
        items: items[start..end].to_vec(),
        pagination: PaginationMeta {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: per_page,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        },
    }
}
