//! Generic CRUD handlers for resource routes
//!
//! Handlers are entity-agnostic: everything resource-specific comes through
//! [`ResourceState`] (repository, mapper, per-resource config). Query input
//! follows the `limit` / `orderby` / `sortorder` / `page` convention, plus
//! whichever filter parameters the resource config names.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::{ApiError, Entity, EntityPayload, QuerySpec};
use crate::core::validation::{validate_patch_document, validate_post_document};
use crate::mapper::{RequestContext, ResourceMapper};
use crate::repository::Repository;
use crate::server::response::{CollectionDocument, ItemDocument};
use crate::storage::EntityStore;

/// Per-resource HTTP configuration
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// Query parameter names collected into the filter mapping
    pub filter_params: Vec<String>,

    /// Page size applied when the request carries no limit, overriding the
    /// repository default
    pub default_limit: Option<usize>,

    /// When true, `limit=-1` returns the whole collection without paging
    pub allow_listing_without_pager: bool,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_param(mut self, name: impl Into<String>) -> Self {
        self.filter_params.push(name.into());
        self
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.default_limit = Some(limit);
        self
    }

    pub fn allow_listing_without_pager(mut self) -> Self {
        self.allow_listing_without_pager = true;
        self
    }
}

/// Shared state for one resource's routes
pub struct ResourceState<T: Entity, S: EntityStore<T>> {
    pub repository: Arc<Repository<T, S>>,
    pub mapper: Arc<dyn ResourceMapper<T>>,
    pub config: Arc<ResourceConfig>,
}

impl<T: Entity, S: EntityStore<T>> ResourceState<T, S> {
    pub fn new(
        repository: Repository<T, S>,
        mapper: impl ResourceMapper<T> + 'static,
        config: ResourceConfig,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            mapper: Arc::new(mapper),
            config: Arc::new(config),
        }
    }
}

impl<T: Entity, S: EntityStore<T>> Clone for ResourceState<T, S> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            mapper: self.mapper.clone(),
            config: self.config.clone(),
        }
    }
}

/// Build the CRUD routes for one resource:
/// - GET    /{resource}          - paginated listing
/// - POST   /{resource}          - create
/// - GET    /{resource}/{id}     - fetch one
/// - PATCH  /{resource}/{id}     - update (PUT accepted as alias)
/// - DELETE /{resource}/{id}     - delete
pub fn resource_routes<T, S>(state: ResourceState<T, S>) -> Router
where
    T: Entity + EntityPayload,
    S: EntityStore<T> + 'static,
{
    let collection = format!("/{}", T::resource_name());
    let member = format!("/{}/{{id}}", T::resource_name());

    Router::new()
        .route(&collection, get(index::<T, S>).post(create::<T, S>))
        .route(
            &member,
            get(show::<T, S>)
                .patch(update::<T, S>)
                .put(update::<T, S>)
                .delete(destroy::<T, S>),
        )
        .with_state(state)
}

/// List entities, paginated by default
pub async fn index<T: Entity, S: EntityStore<T> + 'static>(
    State(state): State<ResourceState<T, S>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let context = RequestContext::new(params.clone());
    let raw_limit = params.get("limit").and_then(|s| s.parse::<i64>().ok());

    let mut spec = QuerySpec::new()
        .with_order(params.get("orderby").cloned().unwrap_or_else(|| "id".into()))
        .with_sort_order(
            params
                .get("sortorder")
                .cloned()
                .unwrap_or_else(|| "asc".into()),
        )
        .with_page(params.get("page").and_then(|s| s.parse().ok()).unwrap_or(1));

    for name in &state.config.filter_params {
        if let Some(value) = params.get(name) {
            spec = spec.with_filter(name.clone(), Value::String(value.clone()));
        }
    }

    if state.config.allow_listing_without_pager && raw_limit == Some(-1) {
        let items = state.repository.list(&spec).await?;
        let data = items
            .iter()
            .map(|entity| state.mapper.to_envelope(entity, &context))
            .collect();
        return Ok(Json(CollectionDocument::plain(data)).into_response());
    }

    match raw_limit {
        Some(limit) if limit > 0 => spec = spec.with_limit(limit as usize),
        _ => {
            if let Some(limit) = state.config.default_limit {
                spec = spec.with_limit(limit);
            }
        }
    }

    let page = state.repository.list_paginated(&spec).await?;
    let data = page
        .items
        .iter()
        .map(|entity| state.mapper.to_envelope(entity, &context))
        .collect();

    Ok(Json(CollectionDocument::paginated(data, &page, T::resource_name())).into_response())
}

/// Fetch a single entity by id
pub async fn show<T: Entity, S: EntityStore<T> + 'static>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiError> {
    let id = parse_id::<T>(&id)?;
    let entity = state.repository.get_by_id(&id).await?;
    let context = RequestContext::new(params);

    Ok(Json(ItemDocument::new(state.mapper.to_envelope(&entity, &context))).into_response())
}

/// Create an entity from a write document
pub async fn create<T: Entity + EntityPayload, S: EntityStore<T> + 'static>(
    State(state): State<ResourceState<T, S>>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let attributes = validate_post_document(&body)?;
    let entity = T::from_attributes(attributes)?;
    let entity = state.repository.create(entity).await?;
    let context = RequestContext::default();

    Ok((
        StatusCode::CREATED,
        Json(ItemDocument::new(state.mapper.to_envelope(&entity, &context))),
    )
        .into_response())
}

/// Update an entity from a write document
pub async fn update<T: Entity + EntityPayload, S: EntityStore<T> + 'static>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let id = parse_id::<T>(&id)?;
    let attributes = validate_patch_document(&body)?;

    let mut entity = state.repository.get_by_id(&id).await?;
    entity.merge_attributes(attributes)?;
    let entity = state.repository.update(&id, entity).await?;
    let context = RequestContext::default();

    Ok(Json(ItemDocument::new(state.mapper.to_envelope(&entity, &context))).into_response())
}

/// Delete an entity; responds 204 with an empty body
pub async fn destroy<T: Entity, S: EntityStore<T> + 'static>(
    State(state): State<ResourceState<T, S>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id::<T>(&id)?;
    state.repository.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// A malformed id can never match a stored entity, so it is a lookup miss
fn parse_id<T: Entity>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound {
        resource: T::resource_name_singular().to_string(),
        id: raw.to_string(),
    })
}
