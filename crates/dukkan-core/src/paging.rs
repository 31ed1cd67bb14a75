//! # Client-Side Pagination
//!
//! Pagination arithmetic for lists the client pages locally (the sales
//! table pages an already-fetched list; server-paged lists use `Page<T>`
//! from [`crate::types`] instead).

/// Number of pages needed to show `total` rows at `per_page` rows each.
///
/// Zero rows still produce one (empty) page so the UI always has a
/// current page to stand on.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 || total == 0 {
        return 1;
    }
    total.div_ceil(per_page)
}

/// Clamps a 1-based page number into `[1, page_count]`.
pub fn clamp_page(page: usize, total: usize, per_page: usize) -> usize {
    page.clamp(1, page_count(total, per_page))
}

/// Returns the slice of `items` visible on 1-based `page`.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 {
        return &[];
    }
    let page = clamp_page(page, items.len(), per_page);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 8), 1);
        assert_eq!(page_count(1, 8), 1);
        assert_eq!(page_count(8, 8), 1);
        assert_eq!(page_count(9, 8), 2);
        assert_eq!(page_count(17, 8), 3);
        assert_eq!(page_count(5, 0), 1);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 20, 8), 1);
        assert_eq!(clamp_page(2, 20, 8), 2);
        assert_eq!(clamp_page(99, 20, 8), 3);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<i32> = (1..=17).collect();
        assert_eq!(page_slice(&items, 1, 8), &items[0..8]);
        assert_eq!(page_slice(&items, 2, 8), &items[8..16]);
        assert_eq!(page_slice(&items, 3, 8), &items[16..17]);
        // Out-of-range pages clamp instead of panicking.
        assert_eq!(page_slice(&items, 9, 8), &items[16..17]);
        assert!(page_slice(&items, 1, 0).is_empty());
    }
}
