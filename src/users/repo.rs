use async_trait::async_trait;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use tokio::sync::Mutex;

/// Stored user record. The password hash never leaves the backend.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub firstname: String,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub firstname: String,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
}

/// Partial update; `None` leaves the column as is.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub hashed_password: Option<String>,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub is_active: Option<bool>,
}

/// User persistence seam. Rows are only ever inserted and updated;
/// there is no delete.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: i32) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn create(&self, new: NewUser) -> anyhow::Result<User>;
    /// Applies the `Some` fields of `changes`; `None` means no such id.
    async fn update(&self, id: i32, changes: UserChanges) -> anyhow::Result<Option<User>>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_superuser, is_verified,
                   firstname, surname, patronymic
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_superuser, is_verified,
                   firstname, surname, patronymic
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, hashed_password, is_active, is_superuser, is_verified,
                   firstname, surname, patronymic
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password, is_active, is_superuser, is_verified,
                               firstname, surname, patronymic)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, email, hashed_password, is_active, is_superuser, is_verified,
                      firstname, surname, patronymic
            "#,
        )
        .bind(new.email)
        .bind(new.hashed_password)
        .bind(new.is_active)
        .bind(new.is_superuser)
        .bind(new.is_verified)
        .bind(new.firstname)
        .bind(new.surname)
        .bind(new.patronymic)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET hashed_password = COALESCE($2, hashed_password),
                firstname = COALESCE($3, firstname),
                surname = COALESCE($4, surname),
                patronymic = COALESCE($5, patronymic),
                is_active = COALESCE($6, is_active)
            WHERE id = $1
            RETURNING id, email, hashed_password, is_active, is_superuser, is_verified,
                      firstname, surname, patronymic
            "#,
        )
        .bind(id)
        .bind(changes.hashed_password)
        .bind(changes.firstname)
        .bind(changes.surname)
        .bind(changes.patronymic)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}

/// In-memory store behind `AppState::fake()` and the unit tests.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    users: Vec<User>,
    next_id: i32,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, id: i32) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let inner = self.inner.lock().await;
        Ok(inner.users.clone())
    }

    async fn create(&self, new: NewUser) -> anyhow::Result<User> {
        let mut inner = self.inner.lock().await;
        if inner.users.iter().any(|u| u.email == new.email) {
            anyhow::bail!("email already taken: {}", new.email);
        }
        inner.next_id += 1;
        let user = User {
            id: inner.next_id,
            email: new.email,
            hashed_password: new.hashed_password,
            is_active: new.is_active,
            is_superuser: new.is_superuser,
            is_verified: new.is_verified,
            firstname: new.firstname,
            surname: new.surname,
            patronymic: new.patronymic,
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let mut inner = self.inner.lock().await;
        let Some(user) = inner.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(hashed_password) = changes.hashed_password {
            user.hashed_password = hashed_password;
        }
        if let Some(firstname) = changes.firstname {
            user.firstname = firstname;
        }
        if let Some(surname) = changes.surname {
            user.surname = Some(surname);
        }
        if let Some(patronymic) = changes.patronymic {
            user.patronymic = Some(patronymic);
        }
        if let Some(is_active) = changes.is_active {
            user.is_active = is_active;
        }
        Ok(Some(user.clone()))
    }
}
