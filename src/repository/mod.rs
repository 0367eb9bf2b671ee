//! Repository composing filter/order policies over an entity store
//!
//! The repository validates filtering and ordering input before the store is
//! read, so malformed requests never reach storage. Pagination metadata is
//! computed from the filtered total and the effective page size.

use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult};
use crate::core::policy::{FilterPolicy, OrderPolicy, SortKey};
use crate::core::query::{Page, PagerConfig, QuerySpec, SortDirection};
use crate::storage::EntityStore;
use serde_json::Value;
use uuid::Uuid;

/// CRUD and listing operations for one entity type
pub struct Repository<T: Entity, S: EntityStore<T>> {
    store: S,
    filter_policy: FilterPolicy<T>,
    order_policy: OrderPolicy,
    pager: PagerConfig,
}

impl<T: Entity, S: EntityStore<T>> Repository<T, S> {
    /// Create a repository with an empty filter whitelist, the default order
    /// whitelist (`id`, `created_at`), and default pagination limits
    pub fn new(store: S) -> Self {
        Self {
            store,
            filter_policy: FilterPolicy::new(),
            order_policy: OrderPolicy::default(),
            pager: PagerConfig::default(),
        }
    }

    pub fn with_filter_policy(mut self, policy: FilterPolicy<T>) -> Self {
        self.filter_policy = policy;
        self
    }

    pub fn with_order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = policy;
        self
    }

    pub fn with_pager(mut self, pager: PagerConfig) -> Self {
        self.pager = pager;
        self
    }

    pub fn pager(&self) -> &PagerConfig {
        &self.pager
    }

    /// List entities matching the spec, filtered then ordered, without
    /// pagination
    pub async fn list(&self, spec: &QuerySpec) -> ApiResult<Vec<T>> {
        let (compiled, sort) = self.compile(spec)?;

        let mut items = self.store.list().await?;
        if let Some(filters) = &compiled {
            items.retain(|entity| filters.matches(entity));
        }
        if let Some(sort) = &sort {
            sort_items(&mut items, sort);
        }

        tracing::debug!(
            resource = T::resource_name(),
            count = items.len(),
            "listed entities"
        );

        Ok(items)
    }

    /// List entities matching the spec as a single page.
    ///
    /// A requested limit of zero or an absent limit falls back to the
    /// configured default; a limit over the hard ceiling rejects the request
    /// before the store is read.
    pub async fn list_paginated(&self, spec: &QuerySpec) -> ApiResult<Page<T>> {
        let limit = match spec.limit {
            None | Some(0) => self.pager.default_limit,
            Some(limit) => limit,
        };
        if limit > self.pager.hard_limit {
            return Err(ApiError::PagerLimitExceeded {
                limit,
                max: self.pager.hard_limit,
            });
        }

        let items = self.list(spec).await?;
        let total = items.len();
        let page = spec.page();
        let items = items
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Ok(Page::new(items, total, limit, page))
    }

    /// Get an entity by ID, failing with NotFound on a miss
    pub async fn get_by_id(&self, id: &Uuid) -> ApiResult<T> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Get the first entity whose field equals the given value
    pub async fn get_by_field(&self, field: &str, value: &Value) -> ApiResult<Option<T>> {
        let items = self.store.list().await?;
        Ok(items.into_iter().find(|entity| {
            entity
                .field(field)
                .map(|f| f.matches_json(value))
                .unwrap_or(false)
        }))
    }

    /// List every entity, unfiltered and unordered
    pub async fn list_all(&self) -> ApiResult<Vec<T>> {
        Ok(self.store.list().await?)
    }

    /// Store a new entity
    pub async fn create(&self, entity: T) -> ApiResult<T> {
        let entity = self.store.insert(entity).await?;
        tracing::debug!(
            resource = T::resource_name_singular(),
            id = %entity.id(),
            "created entity"
        );
        Ok(entity)
    }

    /// Replace an existing entity, failing with NotFound on a miss
    pub async fn update(&self, id: &Uuid, entity: T) -> ApiResult<T> {
        self.store
            .replace(id, entity)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    /// Remove an entity, failing with NotFound on a miss
    pub async fn delete(&self, id: &Uuid) -> ApiResult<()> {
        self.store
            .remove(id)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::debug!(
            resource = T::resource_name_singular(),
            id = %id,
            "deleted entity"
        );
        Ok(())
    }

    /// Validate the spec's filter and order input up front
    fn compile(
        &self,
        spec: &QuerySpec,
    ) -> ApiResult<(
        Option<crate::core::policy::CompiledFilters<T>>,
        Option<SortKey>,
    )> {
        let compiled = match &spec.filters {
            Some(filters) => Some(self.filter_policy.compile(filters)?),
            None => None,
        };
        let sort = self
            .order_policy
            .compile(spec.order_by.as_deref(), spec.sort_order.as_deref())?;
        Ok((compiled, sort))
    }

    fn not_found(id: &Uuid) -> ApiError {
        ApiError::NotFound {
            resource: T::resource_name_singular().to_string(),
            id: id.to_string(),
        }
    }
}

/// Stable sort by the accepted key; entities without the field sort first
fn sort_items<T: Entity>(items: &mut [T], sort: &SortKey) {
    items.sort_by(|a, b| {
        let left = a.field(&sort.key).unwrap_or(crate::core::FieldValue::Null);
        let right = b.field(&sort.key).unwrap_or(crate::core::FieldValue::Null);
        let ordering = left.compare(&right);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
