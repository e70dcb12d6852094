use tracing::info;

use crate::auth::password::hash_password;
use crate::state::AppState;
use crate::users::repo::NewUser;

/// Seeds the first superuser from config on startup. Does nothing when the
/// credentials are not configured or the email is already taken.
pub async fn create_first_superuser(state: &AppState) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (
        state.config.first_superuser_email.clone(),
        state.config.first_superuser_password.clone(),
    ) else {
        return Ok(());
    };

    if state.users.find_by_email(&email).await?.is_some() {
        return Ok(());
    }

    let user = state
        .users
        .create(NewUser {
            email,
            hashed_password: hash_password(&password)?,
            is_active: true,
            is_superuser: true,
            is_verified: true,
            firstname: "Admin".into(),
            surname: None,
            patronymic: None,
        })
        .await?;

    info!(user_id = user.id, email = %user.email, "first superuser created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_superuser_once() {
        let state = AppState::fake();

        create_first_superuser(&state).await.expect("first run");
        create_first_superuser(&state).await.expect("second run");

        let users = state.users.list().await.expect("list");
        assert_eq!(users.len(), 1);
        let admin = &users[0];
        assert_eq!(admin.email, "admin@example.com");
        assert_eq!(admin.firstname, "Admin");
        assert!(admin.is_superuser);
        assert!(admin.is_active);
        assert!(admin.is_verified);
    }

    #[tokio::test]
    async fn does_nothing_without_credentials() {
        let mut state = AppState::fake();
        let mut config = (*state.config).clone();
        config.first_superuser_email = None;
        config.first_superuser_password = None;
        state.config = std::sync::Arc::new(config);

        create_first_superuser(&state).await.expect("run");
        assert!(state.users.list().await.expect("list").is_empty());
    }
}
