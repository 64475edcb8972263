// ==========================================
// Billing Hub - users CRUD API
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{NewUser, UpdateUser, User};
use crate::repository::UserRepository;
use std::sync::Arc;
use tracing::info;

pub struct UserApi {
    user_repo: Arc<UserRepository>,
}

impl UserApi {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        Ok(self.user_repo.list()?)
    }

    pub async fn get_user(&self, id: i64) -> ApiResult<User> {
        self.user_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("User with id={} does not exist", id)))
    }

    pub async fn create_user(&self, user: NewUser) -> ApiResult<()> {
        self.user_repo.create(&user)?;
        info!(id_user = user.id_user, "user created");
        Ok(())
    }

    /// Update a user's contact fields. Both fields are required by the
    /// update surface; absent or blank values are rejected.
    pub async fn update_user(&self, id: i64, update: UpdateUser) -> ApiResult<()> {
        let users_name = update
            .users_name
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("users_name and Email required".to_string()))?;
        let email = update
            .email
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::InvalidInput("users_name and Email required".to_string()))?;

        self.user_repo.update_contact(id, users_name, email)?;
        info!(id_user = id, "user updated");
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> ApiResult<()> {
        self.user_repo.delete(id)?;
        info!(id_user = id, "user deleted");
        Ok(())
    }
}
