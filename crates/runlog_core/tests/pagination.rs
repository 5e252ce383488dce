use runlog_core::{paginate, PaginationView};

fn numbers(count: usize) -> Vec<usize> {
    (1..=count).collect()
}

#[test]
fn first_and_last_pages_slice_expected_items() {
    let items = numbers(23);

    let first = paginate(&items, 10, 1);
    assert_eq!(first.items, numbers(10));
    assert_eq!(first.total_pages, 3);

    let last = paginate(&items, 10, 3);
    assert_eq!(last.items, vec![21, 22, 23]);
    assert_eq!(last.total_pages, 3);
}

#[test]
fn page_beyond_total_is_empty_with_unchanged_total() {
    let items = numbers(23);

    let page = paginate(&items, 10, 4);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 3);

    let page_zero = paginate(&items, 10, 0);
    assert!(page_zero.items.is_empty());
    assert_eq!(page_zero.total_pages, 3);
}

#[test]
fn empty_input_has_zero_pages() {
    let page = paginate::<usize>(&[], 10, 1);
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[test]
fn exact_multiple_does_not_add_trailing_page() {
    let page = paginate(&numbers(20), 10, 2);
    assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
    assert_eq!(page.total_pages, 2);
}

#[test]
fn pagination_view_disables_edges() {
    let first = PaginationView::new(3, 1);
    assert!(first.visible);
    assert!(!first.has_previous);
    assert!(first.has_next);

    let last = PaginationView::new(3, 3);
    assert!(last.has_previous);
    assert!(!last.has_next);

    assert!(!PaginationView::new(0, 1).visible);
}
