//! Repository-level tests for the filter/order/paginate pipeline and CRUD
//! error semantics, run against the in-memory store.

mod support;

use apibase::prelude::*;
use chrono::{Duration, Utc};
use serde_json::json;
use support::{Article, article_repository};
use uuid::Uuid;

async fn seeded_repository(
    titles: &[&str],
) -> Repository<Article, InMemoryStore<Article>> {
    let store = InMemoryStore::new();
    let repository = article_repository(store);
    let base = Utc::now();
    for (i, title) in titles.iter().enumerate() {
        // Spread created_at so ordering by it is deterministic
        let article =
            Article::new(*title).with_created_at(base + Duration::seconds(i as i64));
        repository.create(article).await.unwrap();
    }
    repository
}

mod filtering {
    use super::*;

    #[tokio::test]
    async fn unknown_filter_key_is_rejected() {
        let repository = seeded_repository(&["alpha"]).await;
        let spec = QuerySpec::new().with_filter("author", json!("bob"));

        let err = repository.list(&spec).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(msg) if msg == "filter not allowed"));

        let err = repository.list_paginated(&spec).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(_)));
    }

    #[tokio::test]
    async fn empty_filter_mapping_is_rejected() {
        let repository = seeded_repository(&["alpha"]).await;
        let mut spec = QuerySpec::new();
        spec.filters = Some(Default::default());

        let err = repository.list(&spec).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter(msg) if msg == "no filter info provided"));
    }

    #[tokio::test]
    async fn title_filter_is_case_insensitive_substring() {
        let repository =
            seeded_repository(&["Rust in Production", "production lines", "Gardening"]).await;
        let spec = QuerySpec::new().with_filter("title", json!("PRODUCTION"));

        let items = repository.list(&spec).await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|a| a.title.to_lowercase().contains("production")));
    }

    #[tokio::test]
    async fn null_filter_values_are_skipped() {
        let repository = seeded_repository(&["alpha", "beta"]).await;
        let spec = QuerySpec::new()
            .with_filter("title", json!("alpha"))
            .with_filter("status", serde_json::Value::Null);

        let items = repository.list(&spec).await.unwrap();
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn no_filters_returns_everything() {
        let repository = seeded_repository(&["a", "b", "c"]).await;
        let items = repository.list(&QuerySpec::new()).await.unwrap();
        assert_eq!(items.len(), 3);
    }
}

mod ordering {
    use super::*;

    #[tokio::test]
    async fn unknown_order_key_is_rejected() {
        let repository = seeded_repository(&["alpha"]).await;
        let spec = QuerySpec::new().with_order("name");

        let err = repository.list(&spec).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOrder));
    }

    #[tokio::test]
    async fn unknown_direction_is_rejected() {
        let repository = seeded_repository(&["alpha"]).await;
        let spec = QuerySpec::new().with_order("id").with_sort_order("upwards");

        let err = repository.list(&spec).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidOrder));
    }

    #[tokio::test]
    async fn orders_by_created_at_desc() {
        let repository = seeded_repository(&["first", "second", "third"]).await;
        let spec = QuerySpec::new()
            .with_order("created_at")
            .with_sort_order("desc");

        let items = repository.list(&spec).await.unwrap();
        let titles: Vec<_> = items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn direction_defaults_to_asc() {
        let repository = seeded_repository(&["b", "c", "a"]).await;
        let spec = QuerySpec::new().with_order("title");

        let items = repository.list(&spec).await.unwrap();
        let titles: Vec<_> = items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn filters_apply_before_ordering() {
        let repository = seeded_repository(&["apple pie", "banana", "apple tart"]).await;
        let spec = QuerySpec::new()
            .with_filter("title", json!("apple"))
            .with_order("title")
            .with_sort_order("desc");

        let items = repository.list(&spec).await.unwrap();
        let titles: Vec<_> = items.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["apple tart", "apple pie"]);
    }
}

mod pagination {
    use super::*;

    #[tokio::test]
    async fn limit_over_hard_ceiling_is_rejected() {
        let repository = seeded_repository(&["alpha"]).await;
        let spec = QuerySpec::new().with_limit(1001);

        let err = repository.list_paginated(&spec).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::PagerLimitExceeded { limit: 1001, max: 1000 }
        ));
    }

    #[tokio::test]
    async fn absent_limit_defaults_to_ten() {
        let titles: Vec<String> = (0..15).map(|i| format!("article {i:02}")).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let repository = seeded_repository(&title_refs).await;

        let page = repository.list_paginated(&QuerySpec::new()).await.unwrap();
        assert_eq!(page.per_page, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn twelve_rows_limit_five_gives_three_pages() {
        let titles: Vec<String> = (0..12).map(|i| format!("article {i:02}")).collect();
        let title_refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let repository = seeded_repository(&title_refs).await;

        let spec = QuerySpec::new().with_limit(5).with_order("title");
        let page = repository.list_paginated(&spec).await.unwrap();
        assert_eq!(page.per_page, 5);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 5);

        let last = repository
            .list_paginated(&spec.clone().with_page(3))
            .await
            .unwrap();
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.current_page, 3);
        assert_eq!(last.items[0].title, "article 10");
    }

    #[tokio::test]
    async fn pagination_counts_filtered_total() {
        let repository =
            seeded_repository(&["apple one", "apple two", "apple three", "banana"]).await;
        let spec = QuerySpec::new()
            .with_filter("title", json!("apple"))
            .with_limit(2);

        let page = repository.list_paginated(&spec).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn huge_page_number_yields_empty_page() {
        let repository = seeded_repository(&["alpha", "beta"]).await;
        let spec = QuerySpec::new().with_limit(10).with_page(usize::MAX);

        let page = repository.list_paginated(&spec).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.current_page, usize::MAX);
    }

    #[tokio::test]
    async fn custom_pager_config_is_honored() {
        let store = InMemoryStore::new();
        let repository = Repository::new(store).with_pager(PagerConfig {
            default_limit: 2,
            hard_limit: 5,
        });
        for i in 0..4 {
            repository.create(Article::new(format!("a{i}"))).await.unwrap();
        }

        let page = repository.list_paginated(&QuerySpec::new()).await.unwrap();
        assert_eq!(page.per_page, 2);

        let err = repository
            .list_paginated(&QuerySpec::new().with_limit(6))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PagerLimitExceeded { max: 5, .. }));
    }
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn get_by_id_miss_is_not_found() {
        let repository = seeded_repository(&[]).await;
        let err = repository.get_by_id(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { resource, .. } if resource == "article"));
    }

    #[tokio::test]
    async fn delete_missing_id_leaves_store_untouched() {
        let repository = seeded_repository(&["alpha", "beta"]).await;

        let err = repository.delete(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));

        let remaining = repository.list_all().await.unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn delete_then_lookup_is_not_found() {
        let repository = seeded_repository(&[]).await;
        let article = repository.create(Article::new("ephemeral")).await.unwrap();

        repository.delete(&article.id).await.unwrap();
        let err = repository.get_by_id(&article.id).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let repository = seeded_repository(&[]).await;
        let err = repository
            .update(&Uuid::new_v4(), Article::new("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_replaces_entity() {
        let repository = seeded_repository(&[]).await;
        let article = repository.create(Article::new("before")).await.unwrap();

        let mut changed = article.clone();
        changed.title = "after".to_string();
        repository.update(&article.id, changed).await.unwrap();

        let fetched = repository.get_by_id(&article.id).await.unwrap();
        assert_eq!(fetched.title, "after");
    }

    #[tokio::test]
    async fn get_by_field_finds_first_match() {
        let repository = seeded_repository(&["needle", "hay"]).await;

        let found = repository
            .get_by_field("title", &json!("needle"))
            .await
            .unwrap();
        assert_eq!(found.unwrap().title, "needle");

        let missing = repository
            .get_by_field("title", &json!("absent"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }
}
