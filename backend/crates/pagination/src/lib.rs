//! Offset pagination primitives shared by the user directory endpoints.
//!
//! Listing endpoints accept loosely typed `page` and `limit` query values.
//! [`PageRequest`] normalises them (falling back to page 1 and a limit of 10
//! whenever a value is absent, non-numeric, or not positive) and [`Page`]
//! carries one slice of results together with the totals clients use to
//! render pagination controls.
//!
//! # Example
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::from_raw(Some("2"), Some("5"));
//! assert_eq!(request.offset(), 5);
//!
//! let page = Page::new(vec!["f", "g"], request, 7);
//! assert_eq!(page.current_page(), 2);
//! assert_eq!(page.total_pages(), 2);
//! ```

use std::num::NonZeroU64;

use serde::Deserialize;

/// Page number used when the client omits or garbles the `page` value.
pub const DEFAULT_PAGE: NonZeroU64 = NonZeroU64::MIN;

/// Page size used when the client omits or garbles the `limit` value.
pub const DEFAULT_LIMIT: NonZeroU64 = match NonZeroU64::new(10) {
    Some(limit) => limit,
    None => NonZeroU64::MIN,
};

/// Raw pagination query parameters as received from a client.
///
/// Values stay as strings so malformed input degrades to the defaults rather
/// than failing extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Requested 1-based page number.
    pub page: Option<String>,
    /// Requested number of items per page.
    pub limit: Option<String>,
}

impl From<&PageParams> for PageRequest {
    fn from(params: &PageParams) -> Self {
        Self::from_raw(params.page.as_deref(), params.limit.as_deref())
    }
}

/// Normalised 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: NonZeroU64,
    limit: NonZeroU64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl PageRequest {
    /// Build a request from already validated values.
    #[must_use]
    pub const fn new(page: NonZeroU64, limit: NonZeroU64) -> Self {
        Self { page, limit }
    }

    /// Parse loosely typed query values.
    ///
    /// Leading whitespace is ignored and the leading run of ASCII digits is
    /// read, so `"3"` and `"3rd"` both select page three. Anything that does
    /// not yield a positive integer falls back to the defaults. There is no
    /// upper bound on `limit`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::from_raw(Some("abc"), Some("0"));
    /// assert_eq!((request.page(), request.limit()), (1, 10));
    /// ```
    #[must_use]
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            parse_positive(page).unwrap_or(DEFAULT_PAGE),
            parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        )
    }

    /// Requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page.get()
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit.get()
    }

    /// Number of items to skip before this page starts.
    ///
    /// Saturates instead of overflowing for absurd page numbers; such pages
    /// are simply empty.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.get() - 1).saturating_mul(self.limit.get())
    }
}

fn parse_positive(raw: Option<&str>) -> Option<NonZeroU64> {
    let trimmed = raw?.trim_start();
    let digits_end = trimmed
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(trimmed.len(), |(index, _)| index);
    let digits = trimmed.get(..digits_end)?;
    digits.parse::<u64>().ok().and_then(NonZeroU64::new)
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    current_page: u64,
    total_pages: u64,
    total_items: u64,
}

impl<T> Page<T> {
    /// Assemble a page, deriving `total_pages` as `ceil(total_items / limit)`.
    ///
    /// An empty collection therefore reports zero pages.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            current_page: request.page(),
            total_pages: total_items.div_ceil(request.limit()),
            total_items,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The page number that was requested.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Number of pages needed to show every matching item.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Number of items matching the query across all pages.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }
}
