//! Page-number pagination
//!
//! Clients page with `{ number, size }`; storage pages with `{ skip, take }`.
//! Both conversions here are pure and never validate their input: a page number
//! of zero yields a negative skip, which SQLite treats as no offset.

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Client paging input (1-based page number).
#[derive(InputObject, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(name = "PaginationClientInput")]
pub struct PaginationRequest {
    pub number: i64,
    pub size: i64,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            number: DEFAULT_PAGE_NUMBER,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationRequest {
    /// Build a request from optional halves, defaulting each missing half
    /// on its own (REST query strings may carry only one of them).
    pub fn from_parts(number: Option<i64>, size: Option<i64>) -> Option<Self> {
        if number.is_none() && size.is_none() {
            return None;
        }
        Some(Self {
            number: number.unwrap_or(DEFAULT_PAGE_NUMBER),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// Storage paging window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OffsetLimit {
    pub skip: i64,
    pub take: i64,
}

/// Page metadata returned next to every page of data.
#[derive(SimpleObject, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[graphql(name = "PaginatorData")]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: i64,
    pub current_page: i64,
    pub next_page: Option<i64>,
    pub previous_page: Option<i64>,
    pub per_page: i64,
    pub total_pages: i64,
}

/// A page of records with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

fn resolve(request: Option<&PaginationRequest>) -> PaginationRequest {
    request.copied().unwrap_or_default()
}

/// Translate a page request into a storage window.
pub fn to_offset_limit(request: Option<&PaginationRequest>) -> OffsetLimit {
    let PaginationRequest { number, size } = resolve(request);
    OffsetLimit {
        skip: number.saturating_sub(1).saturating_mul(size),
        take: size,
    }
}

/// Describe the page `request` points at, given `total` matching rows.
pub fn to_meta(request: Option<&PaginationRequest>, total: i64) -> PaginationMeta {
    let PaginationRequest { number, size } = resolve(request);

    let total_pages = if total <= 0 || size <= 0 {
        0
    } else {
        (total - 1) / size + 1
    };

    let next_page = if number >= total_pages {
        None
    } else {
        Some(number + 1)
    };

    let previous_page = if number <= 1 || number >= total_pages {
        None
    } else {
        Some(number - 1)
    };

    PaginationMeta {
        total,
        current_page: number,
        next_page,
        previous_page,
        per_page: size,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(number: i64, size: i64) -> PaginationRequest {
        PaginationRequest { number, size }
    }

    #[test]
    fn test_offset_limit_first_page() {
        assert_eq!(
            to_offset_limit(Some(&page(1, 10))),
            OffsetLimit { skip: 0, take: 10 }
        );
    }

    #[test]
    fn test_offset_limit_third_page() {
        assert_eq!(
            to_offset_limit(Some(&page(3, 10))),
            OffsetLimit { skip: 20, take: 10 }
        );
    }

    #[test]
    fn test_offset_limit_defaults_when_absent() {
        assert_eq!(to_offset_limit(None), OffsetLimit { skip: 0, take: 10 });
    }

    #[test]
    fn test_offset_limit_passes_through_bad_page_numbers() {
        assert_eq!(
            to_offset_limit(Some(&page(0, 10))),
            OffsetLimit { skip: -10, take: 10 }
        );
    }

    #[test]
    fn test_meta_first_of_three() {
        assert_eq!(
            to_meta(Some(&page(1, 10)), 25),
            PaginationMeta {
                total: 25,
                current_page: 1,
                next_page: Some(2),
                previous_page: None,
                per_page: 10,
                total_pages: 3,
            }
        );
    }

    #[test]
    fn test_meta_last_page() {
        assert_eq!(
            to_meta(Some(&page(3, 10)), 25),
            PaginationMeta {
                total: 25,
                current_page: 3,
                next_page: None,
                previous_page: Some(2),
                per_page: 10,
                total_pages: 3,
            }
        );
    }

    #[test]
    fn test_meta_middle_page() {
        let meta = to_meta(Some(&page(2, 5)), 12);
        assert_eq!(meta.next_page, Some(3));
        assert_eq!(meta.previous_page, Some(1));
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_meta_empty_result() {
        let meta = to_meta(Some(&page(1, 10)), 0);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.previous_page, None);
    }

    #[test]
    fn test_meta_past_the_end_has_no_neighbours() {
        let meta = to_meta(Some(&page(7, 10)), 25);
        assert_eq!(meta.next_page, None);
        assert_eq!(meta.previous_page, None);
        assert_eq!(meta.current_page, 7);
    }

    #[test]
    fn test_meta_non_positive_size() {
        assert_eq!(to_meta(Some(&page(1, 0)), 25).total_pages, 0);
    }

    #[test]
    fn test_total_pages_is_ceiling_division() {
        for total in 0..=60 {
            for size in 1..=12 {
                let meta = to_meta(Some(&page(1, size)), total);
                let expected = (total as f64 / size as f64).ceil() as i64;
                assert_eq!(meta.total_pages, expected, "total={total} size={size}");
                assert_eq!(meta.next_page.is_none(), 1 >= expected);
            }
        }
    }

    #[test]
    fn test_huge_page_size_does_not_overflow() {
        let meta = to_meta(Some(&page(1, i64::MAX)), 2);
        assert_eq!(meta.total_pages, 1);
        assert_eq!(meta.next_page, None);
        assert_eq!(
            to_offset_limit(Some(&page(1, i64::MAX))),
            OffsetLimit { skip: 0, take: i64::MAX }
        );
    }

    #[test]
    fn test_extreme_page_number_saturates() {
        assert_eq!(to_offset_limit(Some(&page(i64::MIN, 10))).skip, i64::MIN);
        assert_eq!(to_meta(Some(&page(i64::MAX, 10)), 5).next_page, None);
    }

    #[test]
    fn test_from_parts_defaults_missing_half() {
        assert_eq!(PaginationRequest::from_parts(None, None), None);
        assert_eq!(
            PaginationRequest::from_parts(Some(3), None),
            Some(page(3, DEFAULT_PAGE_SIZE))
        );
        assert_eq!(
            PaginationRequest::from_parts(None, Some(25)),
            Some(page(DEFAULT_PAGE_NUMBER, 25))
        );
    }

    #[test]
    fn test_meta_serializes_camel_case() {
        let json = serde_json::to_value(to_meta(None, 25)).unwrap();
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["previousPage"], serde_json::Value::Null);
    }
}
