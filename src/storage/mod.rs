// Storage module: repository seams consumed by the analytics service plus the two backends.

pub mod memory;
pub mod sqlite;

use crate::config::StorageConfig;
use crate::model::{Form, Response, StorageError};
use async_trait::async_trait;
use std::sync::Arc;

pub use memory::InMemoryStore;
pub use sqlite::SqliteStorage;

#[async_trait]
pub trait FormRepository: Send + Sync {
    /// `Ok(None)` when the form does not exist. Fields come back sorted by display order.
    async fn get_form_by_id(&self, id: &str) -> Result<Option<Form>, StorageError>;

    /// Newest first, optionally restricted to one owner.
    async fn list_forms(&self, user_id: Option<&str>) -> Result<Vec<Form>, StorageError>;
}

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Every response of the form, in no particular order. Empty when there are none.
    async fn get_responses(&self, form_id: &str) -> Result<Vec<Response>, StorageError>;
}

/// Write side used by seeding and tests. The analytics path never writes.
#[async_trait]
pub trait FeedbackWriter: Send + Sync {
    /// Inserts or replaces a form.
    async fn insert_form(&self, form: Form) -> Result<(), StorageError>;

    async fn insert_response(&self, response: Response) -> Result<(), StorageError>;

    /// Deletes the form and all of its responses. Returns false if it did not exist.
    async fn delete_form(&self, id: &str) -> Result<bool, StorageError>;
}

/// Backend selected by configuration.
#[derive(Clone)]
pub enum Store {
    Memory(Arc<InMemoryStore>),
    Sqlite(Arc<SqliteStorage>),
}

impl Store {
    pub fn forms(&self) -> Arc<dyn FormRepository> {
        match self {
            Store::Memory(s) => s.clone(),
            Store::Sqlite(s) => s.clone(),
        }
    }

    pub fn responses(&self) -> Arc<dyn ResponseRepository> {
        match self {
            Store::Memory(s) => s.clone(),
            Store::Sqlite(s) => s.clone(),
        }
    }

    pub fn writer(&self) -> Arc<dyn FeedbackWriter> {
        match self {
            Store::Memory(s) => s.clone(),
            Store::Sqlite(s) => s.clone(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::Sqlite(_) => "sqlite",
        }
    }
}

pub fn open_store(config: &StorageConfig) -> Result<Store, StorageError> {
    match config {
        StorageConfig::Memory => Ok(Store::Memory(Arc::new(InMemoryStore::new()))),
        StorageConfig::Sqlite { path } => Ok(Store::Sqlite(Arc::new(SqliteStorage::new(path)?))),
    }
}
