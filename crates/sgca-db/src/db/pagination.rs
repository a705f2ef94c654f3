//! Pagination types shared by the query modules and the REST façade.
//!
//! The page payload follows the `{content, totalElements, totalPages, size,
//! number}` contract; page numbers are 0-based.

use serde::Serialize;

/// Sort direction for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    /// Parses `asc`/`desc` (case-insensitive); anything else sorts ascending.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Requested page window and ordering.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// 0-based page index.
    pub page: i64,
    /// Page size, at least 1.
    pub size: i64,
    /// Whitelisted sort key; unknown keys fall back to `nombre`.
    pub sort_by: String,
    pub sort_dir: SortDir,
}

impl PageRequest {
    #[must_use]
    pub fn new(page: i64, size: i64, sort_by: impl Into<String>, sort_dir: SortDir) -> Self {
        Self {
            page: page.max(0),
            size: size.max(1),
            sort_by: sort_by.into(),
            sort_dir,
        }
    }

    /// Saturates instead of overflowing so an absurd `page` query parameter
    /// yields an empty page rather than a negative OFFSET.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }

    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 10, "nombre", SortDir::Asc)
    }
}

/// One page of results plus the totals of the full query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub size: i64,
    pub number: i64,
}

impl<T> Page<T> {
    /// Assembles a page from a fetched window and the unpaginated count.
    #[must_use]
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + request.size - 1) / request.size
        };
        Self {
            content,
            total_elements,
            total_pages,
            size: request.size,
            number: request.page,
        }
    }

    /// Maps the page content, keeping the window metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        let req = PageRequest::new(2, 10, "nombre", SortDir::Asc);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);
    }

    #[test]
    fn offset_saturates_instead_of_overflowing() {
        let req = PageRequest::new(i64::MAX / 2, 1000, "nombre", SortDir::Asc);
        assert_eq!(req.offset(), i64::MAX);
        assert!(req.offset() > 0);
    }

    #[test]
    fn page_and_size_are_clamped() {
        let req = PageRequest::new(-3, 0, "nombre", SortDir::Desc);
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let req = PageRequest::new(1, 10, "nombre", SortDir::Asc);
        let page = Page::new(vec![1, 2, 3], &req, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let page: Page<i32> = Page::new(vec![], &PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn page_serializes_with_spring_style_keys() {
        let page = Page::new(vec![1], &PageRequest::default(), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["number"], 0);
    }
}
