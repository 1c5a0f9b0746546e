use crate::persistence::{UserActiveModel, UserModel};
use crate::repository::{user_repository::UserRepository, video_repository::VideoRepository};
use crate::service::error::{ServiceError, map_db_error, map_delete_error};
use crate::service::validation::{self, PERSON_NAME_MAX_LEN, USERNAME_MAX_LEN};
use chrono::Utc;
use sea_orm::{ActiveValue::Set, DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }
}

fn user_not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("user with id={id} was not found"))
}

#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewUser) -> Result<UserModel, ServiceError> {
        let active_model = UserActiveModel {
            username: Set(validation::required_text(
                "username",
                &input.username,
                USERNAME_MAX_LEN,
            )?),
            first_name: Set(validation::optional_text(
                "first_name",
                &input.first_name,
                PERSON_NAME_MAX_LEN,
            )?),
            last_name: Set(validation::optional_text(
                "last_name",
                &input.last_name,
                PERSON_NAME_MAX_LEN,
            )?),
            email: Set(validation::email(&input.email)?),
            is_active: Set(true),
            date_joined: Set(Utc::now().into()),
            ..Default::default()
        };

        let user = UserRepository::insert(self.db.as_ref(), active_model)
            .await
            .map_err(map_db_error)?;

        info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn get(&self, id: i64) -> Result<UserModel, ServiceError> {
        UserRepository::find_by_id(self.db.as_ref(), id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| user_not_found(id))
    }

    /// Deletes a user that authored no videos.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;
        if UserRepository::find_by_id(&txn, id)
            .await
            .map_err(map_db_error)?
            .is_none()
        {
            return Err(user_not_found(id));
        }

        let authored = VideoRepository::count_by_author(&txn, id)
            .await
            .map_err(map_db_error)?;
        if authored > 0 {
            warn!(user_id = id, authored, "Refusing to delete video author");
            return Err(ServiceError::protected(format!(
                "user with id={id} is the author of {authored} video(s)"
            )));
        }

        let rows_affected = UserRepository::delete_by_id(&txn, id)
            .await
            .map_err(map_delete_error)?;
        if rows_affected == 0 {
            return Err(user_not_found(id));
        }

        txn.commit().await.map_err(map_db_error)?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
