//! Response document shapes
//!
//! Item responses wrap a single envelope in `data`; collection responses add
//! a `meta.pagination` block and `links` for page navigation.

use crate::core::query::Page;
use crate::mapper::Envelope;
use serde::Serialize;

/// Single-entity response document: `{ "data": envelope }`
#[derive(Debug, Serialize)]
pub struct ItemDocument {
    pub data: Envelope,
}

/// Collection response document
#[derive(Debug, Serialize)]
pub struct CollectionDocument {
    pub data: Vec<Envelope>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<CollectionMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Serialize)]
pub struct CollectionMeta {
    pub pagination: PaginationMeta,
}

/// Pagination metadata inside `meta.pagination`
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub count: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Page navigation links, relative to the resource path
#[derive(Debug, Serialize)]
pub struct PageLinks {
    pub first: String,
    pub last: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl ItemDocument {
    pub fn new(data: Envelope) -> Self {
        Self { data }
    }
}

impl CollectionDocument {
    /// Unpaged collection: data only, no meta or links
    pub fn plain(data: Vec<Envelope>) -> Self {
        Self {
            data,
            meta: None,
            links: None,
        }
    }

    /// Paged collection with pagination metadata and navigation links
    pub fn paginated<T>(data: Vec<Envelope>, page: &Page<T>, resource_name: &str) -> Self {
        let page_url = |n: usize| format!("/{}?limit={}&page={}", resource_name, page.per_page, n);
        let last_page = page.total_pages.max(1);

        Self {
            data,
            meta: Some(CollectionMeta {
                pagination: PaginationMeta {
                    count: page.total,
                    current_page: page.current_page,
                    per_page: page.per_page,
                    total: page.total,
                    total_pages: page.total_pages,
                },
            }),
            links: Some(PageLinks {
                first: page_url(1),
                last: page_url(last_page),
                prev: page.has_prev().then(|| page_url(page.current_page - 1)),
                next: page.has_next().then(|| page_url(page.current_page + 1)),
            }),
        }
    }
}
