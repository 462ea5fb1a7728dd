/// One page of a result sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Zero-based position of `items[0]` in the full sequence.
    pub first_index: usize,
    pub total_pages: usize,
}

/// Returns `items[(page-1)*page_size .. page*page_size]`, clipped to the sequence.
/// Pages are not validated; one past the end is simply empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size);

    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        first_index: start,
        total_pages,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    Quit,
}

impl From<&str> for Navigation {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "n" | "next" => Navigation::Next,
            "p" | "prev" | "previous" => Navigation::Previous,
            _ => Navigation::Quit,
        }
    }
}

/// Applies a navigation command. Moves past either end are ignored and keep
/// the current page; `None` means the caller should leave the listing.
pub fn step(page: usize, total_pages: usize, nav: Navigation) -> Option<usize> {
    match nav {
        Navigation::Next if page < total_pages => Some(page + 1),
        Navigation::Previous if page > 1 => Some(page - 1),
        Navigation::Next | Navigation::Previous => Some(page),
        Navigation::Quit => None,
    }
}
