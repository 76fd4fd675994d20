// Core structs: Form, Field, Response and the error types shared across modules
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "long-text", alias = "textarea")]
    LongText,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "single-select", alias = "select")]
    SingleSelect,
    #[serde(rename = "multi-select", alias = "checkbox")]
    MultiSelect,
}

impl FieldType {
    pub fn is_text(self) -> bool {
        matches!(self, FieldType::Text | FieldType::LongText)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub order: u32,
}

impl Field {
    pub fn new(id: &str, field_type: FieldType, label: &str, order: u32) -> Self {
        Self {
            id: id.to_string(),
            field_type,
            label: label.to_string(),
            placeholder: None,
            required: false,
            options: None,
            order,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_options(mut self, options: &[&str]) -> Self {
        self.options = Some(options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_active() -> bool {
    true
}

impl Form {
    /// Sorts fields by display order. The sort is stable, so equal orders keep insertion order.
    pub fn sort_fields(&mut self) {
        self.fields.sort_by_key(|f| f.order);
    }

    pub fn fields_of<'a>(&'a self, pred: impl Fn(FieldType) -> bool + 'a) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields.iter().filter(move |f| pred(f.field_type))
    }
}

/// One submission. Answers keep the raw JSON shape handed back by the document store;
/// the analyzer decides what counts as a usable value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub id: String,
    pub form_id: String,
    #[serde(rename = "responses")]
    pub answers: BTreeMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

impl Response {
    pub fn answer(&self, field_id: &str) -> Option<&Value> {
        self.answers.get(field_id)
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Corrupt(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("form not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StorageError),
}
