//! Whitelist policies for filtering and ordering
//!
//! Raw filter and order input is validated here, before any store access.
//! A [`FilterPolicy`] only accepts filter names that were registered with an
//! explicit predicate; there is no implicit pass-through for unrecognized
//! names. An [`OrderPolicy`] only accepts whitelisted sort keys and the
//! literal directions `asc` and `desc`.

use crate::core::entity::Entity;
use crate::core::error::ApiError;
use crate::core::query::SortDirection;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Predicate deciding whether an entity matches a filter value
pub type FilterFn<T> = Arc<dyn Fn(&T, &Value) -> bool + Send + Sync>;

/// Whitelist-based filter validator.
///
/// Each allowed filter name is bound to the predicate that implements it.
/// The allowed set is exactly the set of registered names.
#[derive(Clone)]
pub struct FilterPolicy<T> {
    predicates: IndexMap<String, FilterFn<T>>,
}

impl<T: Entity> FilterPolicy<T> {
    /// Create a policy that allows no filters
    pub fn new() -> Self {
        Self {
            predicates: IndexMap::new(),
        }
    }

    /// Allow a filter name with a custom predicate
    pub fn allow<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Allow a filter doing a case-insensitive substring match against the
    /// entity field of the same name.
    ///
    /// This is the `title LIKE %value%` behavior: a non-string field or a
    /// non-string filter value never matches.
    pub fn allow_contains(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let field_name = name.clone();
        self.allow(name, move |entity: &T, value: &Value| {
            let needle = match value.as_str() {
                Some(s) => s.to_lowercase(),
                None => return false,
            };
            entity
                .field(&field_name)
                .and_then(|f| f.as_string().map(|s| s.to_lowercase().contains(&needle)))
                .unwrap_or(false)
        })
    }

    /// Allow a filter doing an exact match against the entity field of the
    /// same name
    pub fn allow_eq(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let field_name = name.clone();
        self.allow(name, move |entity: &T, value: &Value| {
            entity
                .field(&field_name)
                .map(|f| f.matches_json(value))
                .unwrap_or(false)
        })
    }

    /// The registered filter names, in registration order
    pub fn allowed_names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(|k| k.as_str())
    }

    /// Validate raw filter input and bind each accepted entry to its
    /// predicate.
    ///
    /// Null-valued entries are skipped. An empty mapping or a non-null key
    /// outside the whitelist rejects the whole request.
    pub fn compile(&self, filters: &IndexMap<String, Value>) -> Result<CompiledFilters<T>, ApiError> {
        if filters.is_empty() {
            return Err(ApiError::InvalidFilter("no filter info provided".into()));
        }

        let mut steps = Vec::new();
        for (name, value) in filters {
            if value.is_null() {
                continue;
            }
            let predicate = self
                .predicates
                .get(name)
                .ok_or_else(|| ApiError::InvalidFilter("filter not allowed".into()))?;
            steps.push((value.clone(), predicate.clone()));
        }

        Ok(CompiledFilters { steps })
    }
}

impl<T: Entity> Default for FilterPolicy<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The accepted predicates of one listing request, in request order
pub struct CompiledFilters<T> {
    steps: Vec<(Value, FilterFn<T>)>,
}

impl<T> CompiledFilters<T> {
    /// True when the entity satisfies every accepted filter
    pub fn matches(&self, entity: &T) -> bool {
        self.steps
            .iter()
            .all(|(value, predicate)| predicate(entity, value))
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// Predicates are not Debug, so show the accepted values only
impl<T> fmt::Debug for CompiledFilters<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|(value, _)| value))
            .finish()
    }
}

/// An accepted single-key sort instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub key: String,
    pub direction: SortDirection,
}

/// Whitelist-based order validator.
///
/// Defaults to allowing `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct OrderPolicy {
    allowed_keys: BTreeSet<String>,
}

impl OrderPolicy {
    /// Create a policy allowing exactly the given keys
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Add an allowed order key
    pub fn allow(mut self, key: impl Into<String>) -> Self {
        self.allowed_keys.insert(key.into());
        self
    }

    pub fn allowed_keys(&self) -> impl Iterator<Item = &str> {
        self.allowed_keys.iter().map(|k| k.as_str())
    }

    /// Validate raw order input.
    ///
    /// Absent `order_by` means no ordering. Absent `sort_order` defaults to
    /// ascending. An unknown key or direction rejects the request.
    pub fn compile(
        &self,
        order_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Result<Option<SortKey>, ApiError> {
        let Some(key) = order_by else {
            return Ok(None);
        };

        let direction = match sort_order {
            None => SortDirection::Asc,
            Some(raw) => SortDirection::parse(raw).ok_or(ApiError::InvalidOrder)?,
        };

        if !self.allowed_keys.contains(key) {
            return Err(ApiError::InvalidOrder);
        }

        Ok(Some(SortKey {
            key: key.to_string(),
            direction,
        }))
    }
}

impl Default for OrderPolicy {
    fn default() -> Self {
        Self::new(["id", "created_at"])
    }
}
