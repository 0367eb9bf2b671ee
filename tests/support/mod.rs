//! Shared test fixtures: an Article entity with payload and mapper impls

#![allow(dead_code)]

use apibase::prelude::*;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};
use uuid::Uuid;

use apibase::core::validation::{check_attribute, finish, max_length, required, string};

#[derive(Clone, Debug, PartialEq)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            status: "draft".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

impl Entity for Article {
    fn resource_name() -> &'static str {
        "articles"
    }

    fn resource_name_singular() -> &'static str {
        "article"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Uuid(self.id)),
            "title" => Some(FieldValue::String(self.title.clone())),
            "status" => Some(FieldValue::String(self.status.clone())),
            "created_at" => Some(FieldValue::DateTime(self.created_at)),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at)),
            _ => None,
        }
    }
}

impl EntityPayload for Article {
    fn from_attributes(attributes: &Value) -> Result<Self, ApiError> {
        let mut errors = IndexMap::new();
        check_attribute(
            attributes,
            "title",
            &[&required(), &string(), &max_length(255)],
            &mut errors,
        );
        check_attribute(attributes, "status", &[&string()], &mut errors);
        finish(errors)?;

        let mut article = Article::new(attributes["title"].as_str().unwrap_or_default());
        if let Some(status) = attributes.get("status").and_then(Value::as_str) {
            article.status = status.to_string();
        }
        Ok(article)
    }

    fn merge_attributes(&mut self, attributes: &Value) -> Result<(), ApiError> {
        let mut errors = IndexMap::new();
        check_attribute(
            attributes,
            "title",
            &[&string(), &max_length(255)],
            &mut errors,
        );
        check_attribute(attributes, "status", &[&string()], &mut errors);
        finish(errors)?;

        if let Some(title) = attributes.get("title").and_then(Value::as_str) {
            self.title = title.to_string();
        }
        if let Some(status) = attributes.get("status").and_then(Value::as_str) {
            self.status = status.to_string();
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

pub struct ArticleMapper;

impl ResourceMapper<Article> for ArticleMapper {
    fn resource_type(&self) -> &str {
        "articles"
    }

    fn attributes(&self, entity: &Article, _context: &RequestContext) -> Value {
        json!({
            "title": entity.title,
            "status": entity.status,
            "created_at": entity.created_at.to_rfc3339(),
        })
    }

    fn meta(&self, entity: &Article, _context: &RequestContext) -> Map<String, Value> {
        let mut meta = Map::new();
        meta.insert("title_length".into(), json!(entity.title.chars().count()));
        meta
    }
}

/// Repository wired the way a consuming service would: title filtering plus
/// the default order whitelist extended with title
pub fn article_repository(
    store: InMemoryStore<Article>,
) -> Repository<Article, InMemoryStore<Article>> {
    Repository::new(store)
        .with_filter_policy(FilterPolicy::new().allow_contains("title").allow_eq("status"))
        .with_order_policy(OrderPolicy::default().allow("title"))
}
