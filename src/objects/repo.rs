use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;

/// Placeholder row, nothing but the key yet.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Object {
    pub id: i32,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Object>>;
}

pub struct PgObjectStore {
    pool: PgPool,
}

impl PgObjectStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObjectStore for PgObjectStore {
    async fn list(&self) -> anyhow::Result<Vec<Object>> {
        let rows = sqlx::query_as::<_, Object>(
            r#"
            SELECT id
            FROM objects
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

/// In-memory counterpart used by tests and `AppState::fake()`.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<Vec<Object>>,
}

impl MemoryObjectStore {
    pub fn with_objects(ids: impl IntoIterator<Item = i32>) -> Self {
        Self {
            objects: Mutex::new(ids.into_iter().map(|id| Object { id }).collect()),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn list(&self) -> anyhow::Result<Vec<Object>> {
        Ok(self.objects.lock().await.clone())
    }
}
