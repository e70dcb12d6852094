use serde::{Deserialize, Serialize};

use super::repo::User;

/// Public user representation.
#[derive(Debug, Serialize)]
pub struct UserRead {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub is_verified: bool,
    pub firstname: String,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
}

impl From<User> for UserRead {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            is_verified: user.is_verified,
            firstname: user.firstname,
            surname: user.surname,
            patronymic: user.patronymic,
        }
    }
}

/// Partial profile update applied by a superuser.
#[derive(Debug, Deserialize)]
pub struct UserUpdateRequest {
    pub password: Option<String>,
    pub firstname: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
}

/// Confirmation returned by the soft-delete endpoint.
#[derive(Debug, Serialize)]
pub struct DeactivatedResponse {
    pub message: String,
}
