//! Listing paginator.
//!
//! Slices an ordered result set into fixed-size pages and absorbs bad page
//! tokens instead of surfacing them: a token that is not a positive integer
//! falls back to page 1, and a token past the end falls back to the last page.

use std::num::IntErrorKind;

/// Fixed page size for post listings.
pub const PAGE_SIZE: u64 = 3;

/// Page slicer for a result set of known total size.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    page_size: u64,
}

/// Resolved page position plus the metadata a listing view needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number actually served.
    pub number: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub page_size: u64,
    /// Offset of the first item on this page.
    pub offset: u64,
    pub limit: u64,
    pub has_previous: bool,
    pub has_next: bool,
}

impl Pagination {
    pub fn new(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Resolve an untrusted page token against a result set of `total_items`.
    ///
    /// An empty result set yields an empty page 1.
    pub fn window(&self, token: Option<&str>, total_items: u64) -> PageWindow {
        let total_pages = total_items.div_ceil(self.page_size).max(1);
        let number = parse_page_token(token).min(total_pages);

        PageWindow {
            number,
            total_pages,
            total_items,
            page_size: self.page_size,
            offset: (number - 1) * self.page_size,
            limit: self.page_size,
            has_previous: number > 1,
            has_next: number < total_pages,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

/// A page token must be a positive integer; anything else means page 1.
/// A number too large for `u64` is still a page past the end, so it saturates
/// and clamps to the last page instead of falling back to the first.
fn parse_page_token(token: Option<&str>) -> u64 {
    let Some(raw) = token else { return 1 };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => n,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => u64::MAX,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator() -> Pagination {
        Pagination::new(3)
    }

    #[test]
    fn non_numeric_token_falls_back_to_first_page() {
        for token in ["abc", "", " ", "1.5", "-2", "two"] {
            let window = paginator().window(Some(token), 7);
            assert_eq!(window.number, 1, "token {token:?}");
            assert_eq!(window.offset, 0);
        }
    }

    #[test]
    fn missing_token_means_first_page() {
        let window = paginator().window(None, 7);
        assert_eq!(window.number, 1);
        assert!(!window.has_previous);
        assert!(window.has_next);
    }

    #[test]
    fn zero_is_not_a_valid_page() {
        assert_eq!(paginator().window(Some("0"), 7).number, 1);
    }

    #[test]
    fn second_page_of_seven_items_covers_items_four_to_six() {
        let window = paginator().window(Some("2"), 7);
        assert_eq!(window.number, 2);
        assert_eq!(window.offset, 3);
        assert_eq!(window.limit, 3);
        assert_eq!(window.total_pages, 3);
        assert!(window.has_previous);
        assert!(window.has_next);
    }

    #[test]
    fn token_past_the_end_clamps_to_last_page() {
        let window = paginator().window(Some("99"), 7);
        assert_eq!(window.number, 3);
        assert_eq!(window.offset, 6);
        assert!(window.has_previous);
        assert!(!window.has_next);
    }

    #[test]
    fn numeric_token_beyond_u64_clamps_to_last_page() {
        let window = paginator().window(Some("99999999999999999999999999"), 7);
        assert_eq!(window.number, 3);
        assert_eq!(window.offset, 6);
        assert!(!window.has_next);
    }

    #[test]
    fn empty_result_set_yields_empty_first_page() {
        let window = paginator().window(Some("5"), 0);
        assert_eq!(window.number, 1);
        assert_eq!(window.total_pages, 1);
        assert_eq!(window.total_items, 0);
        assert!(!window.has_previous);
        assert!(!window.has_next);
    }

    #[test]
    fn exact_multiple_has_no_phantom_page() {
        let window = paginator().window(Some("2"), 6);
        assert_eq!(window.total_pages, 2);
        assert_eq!(window.number, 2);
        assert!(!window.has_next);
    }
}
