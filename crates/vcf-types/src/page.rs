use serde::Serialize;

/// One page of a listing.
///
/// Page numbers start at 1. A missing page number selects the first page;
/// zero or a number past the end selects the last page. An empty listing
/// still has one (empty) page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn paginate(items: Vec<T>, page: Option<usize>, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);

        let number = match page {
            None => 1,
            Some(n) if n == 0 || n > total_pages => total_pages,
            Some(n) => n,
        };

        let items = items
            .into_iter()
            .skip((number - 1) * per_page)
            .take(per_page)
            .collect();

        Self {
            items,
            number,
            total_pages,
            total_items,
            per_page,
        }
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_by_default() {
        let page = Page::paginate((1..=45).collect(), None, 20);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.items[0], 1);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_last_partial_page() {
        let page = Page::paginate((1..=45).collect(), Some(3), 20);
        assert_eq!(page.items, vec![41, 42, 43, 44, 45]);
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_selects_last_page() {
        let past_end = Page::paginate((1..=45).collect::<Vec<_>>(), Some(99), 20);
        assert_eq!(past_end.number, 3);
        let zero = Page::paginate((1..=45).collect::<Vec<_>>(), Some(0), 20);
        assert_eq!(zero.number, 3);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let page: Page<u32> = Page::paginate(Vec::new(), Some(4), 20);
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }
}
