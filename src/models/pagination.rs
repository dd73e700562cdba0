//! Page-number strip for paginated lists.
//!
//! The strip always shows the first and last page, a window of up to
//! `PAGE_RANGE` pages either side of the current one, and an ellipsis
//! wherever pages are skipped. Near either end the window is widened so
//! the strip keeps a stable length.

use std::fmt;

/// Pages shown on each side of the current page.
pub const PAGE_RANGE: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Compute the markers to render for `current_page` of `total_pages`.
///
/// Returns an empty strip when there is at most one page.
pub fn page_markers(current_page: u32, total_pages: u32) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = i64::from(current_page);
    let total = i64::from(total_pages);
    let mut markers = vec![PageMarker::Page(1)];

    let mut start = (current - PAGE_RANGE).max(2);
    let mut end = (current + PAGE_RANGE).min(total - 1);

    if current - PAGE_RANGE < 2 {
        end = (total - 1).min(2 * PAGE_RANGE + 1);
    }
    if current + PAGE_RANGE >= total - 1 {
        start = (total - 2 * PAGE_RANGE).max(2);
    }

    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((start..=end).map(|p| PageMarker::Page(p as u32)));
    if end < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total_pages));

    markers
}

/// Page to navigate to when `marker` is activated, if any.
///
/// Ellipses and the current page are inert.
pub fn navigate_to(marker: PageMarker, current_page: u32) -> Option<u32> {
    match marker {
        PageMarker::Page(n) if n != current_page => Some(n),
        _ => None,
    }
}

/// Number of pages needed for `total` items at `per_page` items each.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(u64::from(per_page)).min(u64::from(u32::MAX)) as u32
}

/// One rendered entry of the pager strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerLink {
    pub label: String,
    /// `None` for inert entries (ellipsis, current page).
    pub href: Option<String>,
    pub current: bool,
}

/// Pager ready for a template: previous/next plus the marker strip.
#[derive(Debug, Clone, Default)]
pub struct Pager {
    pub links: Vec<PagerLink>,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

impl Pager {
    /// Build a pager whose links are produced by `href_for(page)`.
    pub fn build<F>(current_page: u32, total_pages: u32, href_for: F) -> Self
    where
        F: Fn(u32) -> String,
    {
        let markers = page_markers(current_page, total_pages);
        if markers.is_empty() {
            return Self::default();
        }

        let links = markers
            .into_iter()
            .map(|marker| PagerLink {
                label: marker.to_string(),
                href: navigate_to(marker, current_page).map(&href_for),
                current: marker == PageMarker::Page(current_page),
            })
            .collect();

        let prev_href = (current_page > 1).then(|| href_for(current_page - 1));
        let next_href = (current_page < total_pages).then(|| href_for(current_page + 1));

        Self { links, prev_href, next_href }
    }

    pub fn is_visible(&self) -> bool {
        !self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageMarker::{Ellipsis, Page};

    fn pages(range: std::ops::RangeInclusive<u32>) -> Vec<PageMarker> {
        range.map(Page).collect()
    }

    #[test]
    fn no_strip_for_single_page() {
        assert!(page_markers(1, 0).is_empty());
        assert!(page_markers(1, 1).is_empty());
    }

    #[test]
    fn middle_of_twenty_pages() {
        let mut expected = vec![Page(1), Ellipsis];
        expected.extend(pages(5..=15));
        expected.extend([Ellipsis, Page(20)]);
        assert_eq!(page_markers(10, 20), expected);
    }

    #[test]
    fn five_pages_from_the_start() {
        assert_eq!(page_markers(1, 5), pages(1..=5));
    }

    #[test]
    fn two_pages() {
        assert_eq!(page_markers(1, 2), vec![Page(1), Page(2)]);
        assert_eq!(page_markers(2, 2), vec![Page(1), Page(2)]);
    }

    #[test]
    fn start_of_long_list_widens_to_the_right() {
        let mut expected = pages(1..=11);
        expected.extend([Ellipsis, Page(50)]);
        assert_eq!(page_markers(1, 50), expected);
    }

    #[test]
    fn end_of_long_list_widens_to_the_left() {
        let mut expected = vec![Page(1), Ellipsis];
        expected.extend(pages(40..=50));
        assert_eq!(page_markers(50, 50), expected);
    }

    #[test]
    fn strip_invariants_hold_for_every_page() {
        for total in 2..=40u32 {
            for current in 1..=total {
                let markers = page_markers(current, total);
                assert_eq!(markers.first(), Some(&Page(1)), "total={total} current={current}");
                assert_eq!(markers.last(), Some(&Page(total)), "total={total} current={current}");

                let numbers: Vec<u32> = markers
                    .iter()
                    .filter_map(|m| match m {
                        Page(n) => Some(*n),
                        Ellipsis => None,
                    })
                    .collect();
                assert!(
                    numbers.windows(2).all(|w| w[0] < w[1]),
                    "not strictly increasing: total={total} current={current} {markers:?}"
                );
                assert!(numbers.contains(&current));

                // Ellipses only appear where pages are actually skipped.
                for (i, m) in markers.iter().enumerate() {
                    if *m == Ellipsis {
                        let (Page(before), Page(after)) = (markers[i - 1], markers[i + 1]) else {
                            panic!("ellipsis not between pages: {markers:?}");
                        };
                        assert!(after > before + 1);
                    }
                }
            }
        }
    }

    #[test]
    fn ellipsis_and_current_page_are_inert() {
        assert_eq!(navigate_to(Ellipsis, 3), None);
        assert_eq!(navigate_to(Page(3), 3), None);
        assert_eq!(navigate_to(Page(4), 3), Some(4));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn pager_disables_prev_on_first_and_next_on_last() {
        let first = Pager::build(1, 3, |p| format!("?page={p}"));
        assert!(first.prev_href.is_none());
        assert_eq!(first.next_href.as_deref(), Some("?page=2"));

        let last = Pager::build(3, 3, |p| format!("?page={p}"));
        assert_eq!(last.prev_href.as_deref(), Some("?page=2"));
        assert!(last.next_href.is_none());
    }

    #[test]
    fn pager_marks_current_page_without_link() {
        let pager = Pager::build(2, 3, |p| format!("?page={p}"));
        let current: Vec<&PagerLink> = pager.links.iter().filter(|l| l.current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].label, "2");
        assert!(current[0].href.is_none());
    }

    #[test]
    fn pager_hidden_for_single_page() {
        let pager = Pager::build(1, 1, |p| format!("?page={p}"));
        assert!(!pager.is_visible());
        assert!(pager.prev_href.is_none() && pager.next_href.is_none());
    }
}
