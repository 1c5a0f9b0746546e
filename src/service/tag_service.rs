use crate::persistence::{TagActiveModel, TagModel};
use crate::repository::tag_repository::TagRepository;
use crate::service::error::{ServiceError, map_db_error, map_delete_error};
use crate::service::validation::{self, TAG_NAME_MAX_LEN};
use sea_orm::{ActiveValue::Set, DatabaseConnection, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

fn tag_not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("tag with id={id} was not found"))
}

#[derive(Clone)]
pub struct TagService {
    db: Arc<DatabaseConnection>,
}

impl TagService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewTag) -> Result<TagModel, ServiceError> {
        let name = validation::required_text("name", &input.name, TAG_NAME_MAX_LEN)?;
        let active_model = TagActiveModel {
            name: Set(name),
            ..Default::default()
        };

        let tag = TagRepository::insert(self.db.as_ref(), active_model)
            .await
            .map_err(map_db_error)?;

        info!(tag_id = tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    pub async fn get(&self, id: i64) -> Result<TagModel, ServiceError> {
        TagRepository::find_by_id(self.db.as_ref(), id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| tag_not_found(id))
    }

    pub async fn find_by_name(&self, name: &str) -> Result<TagModel, ServiceError> {
        TagRepository::find_by_name(self.db.as_ref(), name.trim())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| ServiceError::not_found(format!("tag with name={name} was not found")))
    }

    /// All tags ordered by name.
    pub async fn list(&self) -> Result<Vec<TagModel>, ServiceError> {
        TagRepository::list(self.db.as_ref())
            .await
            .map_err(map_db_error)
    }

    pub async fn rename(&self, id: i64, name: &str) -> Result<TagModel, ServiceError> {
        let name = validation::required_text("name", name, TAG_NAME_MAX_LEN)?;

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let existing = TagRepository::find_by_id(&txn, id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| tag_not_found(id))?;
        if existing.name == name {
            return Ok(existing);
        }

        let mut active_model = existing.into_active_model();
        active_model.name = Set(name);
        let updated = TagRepository::update(&txn, active_model)
            .await
            .map_err(map_db_error)?;

        txn.commit().await.map_err(map_db_error)?;
        Ok(updated)
    }

    /// Deletes a tag; its links to videos go with it, the videos stay.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let rows_affected = TagRepository::delete_by_id(self.db.as_ref(), id)
            .await
            .map_err(map_delete_error)?;
        if rows_affected == 0 {
            return Err(tag_not_found(id));
        }

        info!(tag_id = id, "Tag deleted");
        Ok(())
    }
}
