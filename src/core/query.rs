//! Listing intent and pagination types

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Sort direction for an accepted order key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a raw direction string. Only `asc` and `desc` are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

/// Immutable description of filter, order, and pagination intent for a
/// listing request.
///
/// Filter values and the order/direction strings are raw request input; they
/// are validated by [`FilterPolicy`](crate::core::policy::FilterPolicy) and
/// [`OrderPolicy`](crate::core::policy::OrderPolicy) before any store access.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    /// Raw filter key/value pairs, in request order. None means no filtering.
    pub filters: Option<IndexMap<String, Value>>,

    /// Requested order key. None means no ordering.
    pub order_by: Option<String>,

    /// Requested sort direction. None defaults to ascending.
    pub sort_order: Option<String>,

    /// Requested page size. None falls back to the pager default.
    pub limit: Option<usize>,

    /// Page number, starting at 1
    pub page: usize,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// Get the page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn with_filter(mut self, name: impl Into<String>, value: Value) -> Self {
        self.filters
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), value);
        self
    }

    pub fn with_order(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// Pagination limits, passed to the repository at construction
#[derive(Debug, Clone, Copy)]
pub struct PagerConfig {
    /// Page size used when the request carries no limit
    pub default_limit: usize,

    /// Hard ceiling; requests above it are rejected
    pub hard_limit: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            hard_limit: 1000,
        }
    }
}

/// A bounded slice of a listing result plus count/navigation metadata.
///
/// Constructed per request, never mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub per_page: usize,
    pub current_page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Build a page from the already-sliced items and overall counts
    pub fn new(items: Vec<T>, total: usize, per_page: usize, current_page: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            items,
            total,
            per_page,
            current_page,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_direction_parse() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("ASC"), None);
        assert_eq!(SortDirection::parse("sideways"), None);
    }

    #[test]
    fn test_query_spec_defaults() {
        let spec = QuerySpec::new();
        assert!(spec.filters.is_none());
        assert!(spec.order_by.is_none());
        assert!(spec.limit.is_none());
        assert_eq!(spec.page(), 1);
    }

    #[test]
    fn test_query_spec_builder_preserves_filter_order() {
        let spec = QuerySpec::new()
            .with_filter("title", json!("foo"))
            .with_filter("status", json!("active"));
        let filters = spec.filters.unwrap();
        let keys: Vec<_> = filters.keys().cloned().collect();
        assert_eq!(keys, vec!["title", "status"]);
    }

    #[test]
    fn test_pager_config_defaults() {
        let config = PagerConfig::default();
        assert_eq!(config.default_limit, 10);
        assert_eq!(config.hard_limit, 1000);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1, 2, 3, 4, 5], 12, 5, 1);
        assert_eq!(page.total, 12);
        assert_eq!(page.per_page, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_empty_page() {
        let page: Page<i32> = Page::new(vec![], 0, 10, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_exact_division() {
        let page: Page<i32> = Page::new(vec![], 20, 5, 4);
        assert_eq!(page.total_pages, 4);
        assert!(!page.has_next());
        assert!(page.has_prev());
    }
}
