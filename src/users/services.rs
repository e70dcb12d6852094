use crate::error::ApiError;

use super::repo::{User, UserChanges, UserStore};

fn user_not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Пользователь с id={id} не найден!"))
}

/// Soft delete: the row stays, `is_active` drops to false.
/// Deactivating an already inactive user succeeds without a store write.
pub async fn deactivate_user(store: &dyn UserStore, id: i32) -> Result<User, ApiError> {
    let user = store.get(id).await?.ok_or_else(|| user_not_found(id))?;
    if !user.is_active {
        return Ok(user);
    }
    store
        .update(
            id,
            UserChanges {
                is_active: Some(false),
                ..UserChanges::default()
            },
        )
        .await?
        .ok_or_else(|| user_not_found(id))
}

pub async fn list_users(store: &dyn UserStore) -> Result<Vec<User>, ApiError> {
    let all_users = store.list().await?;
    if all_users.is_empty() {
        return Err(ApiError::NotFound("Список пользователей пуст!".into()));
    }
    Ok(all_users)
}

pub async fn get_user(store: &dyn UserStore, id: i32) -> Result<User, ApiError> {
    store.get(id).await?.ok_or_else(|| user_not_found(id))
}

pub async fn update_user(
    store: &dyn UserStore,
    id: i32,
    changes: UserChanges,
) -> Result<User, ApiError> {
    store
        .update(id, changes)
        .await?
        .ok_or_else(|| user_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repo::{MemoryUserStore, NewUser};

    fn new_user(email: &str, is_active: bool, is_superuser: bool) -> NewUser {
        NewUser {
            email: email.into(),
            hashed_password: "hash".into(),
            is_active,
            is_superuser,
            is_verified: false,
            firstname: "Richard".into(),
            surname: Some("Roe".into()),
            patronymic: Some("Ivanovich".into()),
        }
    }

    #[tokio::test]
    async fn deactivate_marks_user_inactive() {
        let store = MemoryUserStore::default();
        let created = store
            .create(new_user("a@x.com", true, false))
            .await
            .expect("create");

        let deactivated = deactivate_user(&store, created.id).await.expect("deactivate");
        assert!(!deactivated.is_active);

        let stored = store.get(created.id).await.expect("get").expect("exists");
        assert!(!stored.is_active);
    }

    #[tokio::test]
    async fn deactivate_is_idempotent() {
        let store = MemoryUserStore::default();
        let created = store
            .create(new_user("a@x.com", true, false))
            .await
            .expect("create");

        let first = deactivate_user(&store, created.id).await.expect("first call");
        let after_first = store.list().await.expect("list");

        let second = deactivate_user(&store, created.id).await.expect("second call");
        let after_second = store.list().await.expect("list");

        assert!(!first.is_active);
        assert!(!second.is_active);
        assert_eq!(after_first.len(), after_second.len());
        assert!(!after_second[0].is_active);
    }

    #[tokio::test]
    async fn deactivate_unknown_id_is_not_found() {
        let store = MemoryUserStore::default();
        store
            .create(new_user("a@x.com", true, false))
            .await
            .expect("create");

        let err = deactivate_user(&store, 999).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("id=999"));

        // Никакой мутации при промахе
        let users = store.list().await.expect("list");
        assert_eq!(users.len(), 1);
        assert!(users[0].is_active);
    }

    #[tokio::test]
    async fn deactivate_keeps_all_other_fields() {
        let store = MemoryUserStore::default();
        let created = store
            .create(new_user("keep@x.com", true, true))
            .await
            .expect("create");

        let deactivated = deactivate_user(&store, created.id).await.expect("deactivate");

        assert_eq!(deactivated.email, created.email);
        assert_eq!(deactivated.firstname, created.firstname);
        assert_eq!(deactivated.surname, created.surname);
        assert_eq!(deactivated.patronymic, created.patronymic);
        assert_eq!(deactivated.is_superuser, created.is_superuser);
        assert_eq!(deactivated.hashed_password, created.hashed_password);
        assert!(!deactivated.is_active);
    }

    #[tokio::test]
    async fn list_users_empty_store_is_not_found() {
        let store = MemoryUserStore::default();
        let err = list_users(&store).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert!(err.to_string().contains("пуст"));
    }

    #[tokio::test]
    async fn list_users_preserves_store_order() {
        let store = MemoryUserStore::default();
        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            store
                .create(new_user(email, true, false))
                .await
                .expect("create");
        }

        let users = list_users(&store).await.expect("list");
        let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["a@x.com", "b@x.com", "c@x.com"]);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryUserStore::default();
        let err = update_user(&store, 7, UserChanges::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
