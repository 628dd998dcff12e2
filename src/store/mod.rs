// src/store/mod.rs

use uuid::Uuid;

use crate::models::Scenario;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scenario {0} not found")]
    NotFound(Uuid),
    #[error("scenario {0} already exists")]
    Conflict(Uuid),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt scenario payload: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Scenario persistence. Every write is a whole-record insert, replace or delete.
#[derive(Clone)]
pub enum ScenarioStore {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl ScenarioStore {
    pub fn in_memory() -> Self {
        ScenarioStore::Memory(MemoryStore::default())
    }

    pub fn backend(&self) -> &'static str {
        match self {
            ScenarioStore::Memory(_) => "memory",
            ScenarioStore::Postgres(_) => "postgres",
        }
    }

    pub async fn insert(&self, s: &Scenario) -> Result<(), StoreError> {
        match self {
            ScenarioStore::Memory(m) => m.insert(s).await,
            ScenarioStore::Postgres(p) => p.insert(s).await,
        }
    }

    /// Newest first.
    pub async fn list(&self) -> Result<Vec<Scenario>, StoreError> {
        match self {
            ScenarioStore::Memory(m) => Ok(m.list().await),
            ScenarioStore::Postgres(p) => p.list().await,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Scenario, StoreError> {
        match self {
            ScenarioStore::Memory(m) => m.get(id).await,
            ScenarioStore::Postgres(p) => p.get(id).await,
        }
    }

    pub async fn replace(&self, s: &Scenario) -> Result<(), StoreError> {
        match self {
            ScenarioStore::Memory(m) => m.replace(s).await,
            ScenarioStore::Postgres(p) => p.replace(s).await,
        }
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        match self {
            ScenarioStore::Memory(m) => Ok(m.delete(id).await),
            ScenarioStore::Postgres(p) => p.delete(id).await,
        }
    }
}
