//! Fixed-size page slicing over the filtered run set.

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of items plus the page count of the whole input.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
}

/// Pagination control state handed to the pagination renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub total_pages: usize,
    pub current_page: usize,
    /// Controls are hidden for zero or one page.
    pub visible: bool,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PaginationView {
    pub fn new(total_pages: usize, current_page: usize) -> Self {
        Self {
            total_pages,
            current_page,
            visible: total_pages > 1,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }
}

/// `ceil(count / page_size)`; a zero page size counts as one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Clamps a 1-based page number into `[1, total_pages]` (1 when empty).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Returns the 1-based `page_number` slice of `items`.
///
/// Out-of-range pages (including 0) yield no items; `total_pages` is
/// always computed from the full input.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(items.len(), page_size);

    let page_items = match page_number.checked_sub(1) {
        Some(index) if index < total_pages => {
            let start = index * page_size;
            let end = (start + page_size).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    };

    Page {
        items: page_items,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, total_pages, PaginationView};

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn clamp_page_keeps_page_one_for_empty_sets() {
        assert_eq!(clamp_page(4, 0), 1);
        assert_eq!(clamp_page(4, 2), 2);
        assert_eq!(clamp_page(0, 2), 1);
    }

    #[test]
    fn single_page_hides_controls() {
        let view = PaginationView::new(1, 1);
        assert!(!view.visible);
        assert!(!view.has_previous);
        assert!(!view.has_next);
    }
}
