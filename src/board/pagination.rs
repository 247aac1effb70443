use std::fmt;

/// Pager buttons shown at once
pub const MAX_VISIBLE_PAGES: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page numbers for a pager centred on `current`.
///
/// All pages are listed when they fit in `max_visible`. Otherwise a window of
/// `max_visible` pages around `current` is shown, with the first and last page
/// always present and `...` standing in for skipped runs.
pub fn page_numbers(current: u32, total: u32, max_visible: u32) -> Vec<PageItem> {
    if total <= max_visible {
        return (1..=total).map(PageItem::Page).collect();
    }

    let (current, total, max_visible) = (current as i64, total as i64, max_visible as i64);
    let half = max_visible / 2;
    let mut start = (current - half).max(1);
    let mut end = (current + half).min(total);

    if current <= half {
        end = max_visible;
    }
    if current >= total - half {
        start = total - max_visible + 1;
    }

    let mut pages = Vec::new();

    if start > 1 {
        pages.push(PageItem::Page(1));
        if start > 2 {
            pages.push(PageItem::Ellipsis);
        }
    }

    pages.extend((start..=end).map(|n| PageItem::Page(n as u32)));

    if end < total {
        if end < total - 1 {
            pages.push(PageItem::Ellipsis);
        }
        pages.push(PageItem::Page(total as u32));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page};

    #[test]
    fn test_few_pages_listed_in_full() {
        assert_eq!(page_numbers(1, 3, 5), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_numbers(1, 0, 5), vec![]);
    }

    #[test]
    fn test_first_page_of_many() {
        assert_eq!(
            page_numbers(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_middle_page_of_many() {
        assert_eq!(
            page_numbers(5, 10, 5),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6), Page(7), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_last_page_of_many() {
        assert_eq!(
            page_numbers(10, 10, 5),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn test_no_ellipsis_when_gap_is_one_page() {
        // window 2..6 touches page 1, window ends one before last
        assert_eq!(
            page_numbers(4, 7, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_display() {
        let rendered: Vec<String> = page_numbers(5, 10, 5).iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered.join(" "), "1 ... 3 4 5 6 7 ... 10");
    }
}
