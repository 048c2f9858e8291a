//! Page arithmetic and navigation links for list endpoints.

use serde::Serialize;

use crate::errors::AppError;

/// Default number of items per page when not specified in the request.
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Maximum allowed items per page.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Validated page/limit pair for a list request.
///
/// Construction rejects zero values, so the arithmetic below never divides
/// by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, AppError> {
        if page == 0 {
            return Err(AppError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if limit == 0 {
            return Err(AppError::Validation(
                "limit must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_LIMIT),
        })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items to skip before the requested page starts.
    pub fn skip(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Pagination metadata for a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u64,
    pub data_per_page: u64,
    pub total_pages: u64,
    pub total_data: u64,
    pub has_next_page: bool,
}

/// Relative navigation links. `None` serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Result of paginating a collection of `total_data` items.
#[derive(Debug, Clone)]
pub struct Page {
    pub info: PageInfo,
    pub links: PageLinks,
}

/// Compute pagination metadata and navigation links.
///
/// An empty collection yields zero pages, no next page, and no links.
pub fn paginate(total_data: u64, request: &PageRequest, base_path: &str) -> Page {
    let page = request.page();
    let limit = request.limit();

    let total_pages = total_data.div_ceil(limit);
    let has_next_page = page < total_pages;

    let previous = (page > 1).then(|| format!("{}?page={}", base_path, page - 1));
    let next = has_next_page.then(|| format!("{}?page={}", base_path, page + 1));

    Page {
        info: PageInfo {
            current_page: page,
            data_per_page: limit,
            total_pages,
            total_data,
            has_next_page,
        },
        links: PageLinks { previous, next },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, limit: u64) -> PageRequest {
        PageRequest::new(page, limit).unwrap()
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        assert_eq!(paginate(45, &request(1, 20), "/tags").info.total_pages, 3);
        assert_eq!(paginate(40, &request(1, 20), "/tags").info.total_pages, 2);
        assert_eq!(paginate(1, &request(1, 20), "/tags").info.total_pages, 1);
        assert_eq!(paginate(0, &request(1, 20), "/tags").info.total_pages, 0);
    }

    #[test]
    fn test_first_of_three_pages() {
        let page = paginate(45, &request(1, 20), "/tags");

        assert_eq!(page.info.current_page, 1);
        assert_eq!(page.info.data_per_page, 20);
        assert_eq!(page.info.total_pages, 3);
        assert_eq!(page.info.total_data, 45);
        assert!(page.info.has_next_page);
        assert_eq!(page.links.previous, None);
        assert_eq!(page.links.next, Some("/tags?page=2".to_string()));
    }

    #[test]
    fn test_middle_page_links_both_ways() {
        let page = paginate(45, &request(2, 20), "/tags");

        assert!(page.info.has_next_page);
        assert_eq!(page.links.previous, Some("/tags?page=1".to_string()));
        assert_eq!(page.links.next, Some("/tags?page=3".to_string()));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = paginate(45, &request(3, 20), "/tags");

        assert!(!page.info.has_next_page);
        assert_eq!(page.links.previous, Some("/tags?page=2".to_string()));
        assert_eq!(page.links.next, None);
    }

    #[test]
    fn test_empty_collection() {
        let page = paginate(0, &request(1, 20), "/tags");

        assert_eq!(page.info.total_pages, 0);
        assert!(!page.info.has_next_page);
        assert_eq!(page.links.previous, None);
        assert_eq!(page.links.next, None);
    }

    #[test]
    fn test_has_next_page_iff_page_below_total() {
        for total in [0u64, 1, 19, 20, 21, 45, 100] {
            for page_no in 1u64..=6 {
                let page = paginate(total, &request(page_no, 20), "/tags");
                assert_eq!(
                    page.info.has_next_page,
                    page_no < page.info.total_pages,
                    "total={} page={}",
                    total,
                    page_no
                );
                assert_eq!(page.links.previous.is_some(), page_no > 1);
            }
        }
    }

    #[test]
    fn test_skip_arithmetic() {
        assert_eq!(request(1, 20).skip(), 0);
        assert_eq!(request(2, 20).skip(), 20);
        assert_eq!(request(3, 10).skip(), 20);
    }

    #[test]
    fn test_rejects_zero_page_and_limit() {
        assert!(PageRequest::new(0, 20).is_err());
        assert!(PageRequest::new(1, 0).is_err());
    }

    #[test]
    fn test_limit_is_capped() {
        assert_eq!(request(1, 1000).limit(), MAX_PAGE_LIMIT);
    }
}
