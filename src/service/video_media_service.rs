use crate::persistence::{VideoMediaActiveModel, VideoMediaModel, VideoMediaStatus};
use crate::repository::{
    video_media_repository::VideoMediaRepository, video_repository::VideoRepository,
};
use crate::service::error::{ServiceError, map_db_error, map_delete_error};
use crate::service::validation::{self, VIDEO_PATH_MAX_LEN};
use sea_orm::{ActiveValue::Set, DatabaseConnection, IntoActiveModel, TransactionTrait};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewVideoMedia {
    pub video_id: i64,
    pub video_path: String,
    /// Falls back to [`VideoMediaStatus::UploadStarted`].
    #[serde(default)]
    pub status: Option<VideoMediaStatus>,
}

impl NewVideoMedia {
    pub fn new(video_id: i64, video_path: impl Into<String>) -> Self {
        Self {
            video_id,
            video_path: video_path.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: VideoMediaStatus) -> Self {
        self.status = Some(status);
        self
    }
}

fn media_not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("video media with id={id} was not found"))
}

#[derive(Clone)]
pub struct VideoMediaService {
    db: Arc<DatabaseConnection>,
}

impl VideoMediaService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Attaches the media row of a video. A video has at most one.
    pub async fn create(&self, input: NewVideoMedia) -> Result<VideoMediaModel, ServiceError> {
        let video_path =
            validation::required_text("video_path", &input.video_path, VIDEO_PATH_MAX_LEN)?;

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let video_exists = VideoRepository::find_by_id(&txn, input.video_id)
            .await
            .map_err(map_db_error)?
            .is_some();
        if !video_exists {
            return Err(ServiceError::bad_request(format!(
                "invalid `video_id`: referenced record {} not found",
                input.video_id
            )));
        }

        if let Some(existing) = VideoMediaRepository::find_by_video_id(&txn, input.video_id)
            .await
            .map_err(map_db_error)?
        {
            return Err(ServiceError::conflict(format!(
                "video with id={} already has media with id={}",
                input.video_id, existing.id
            )));
        }

        let mut active_model = VideoMediaActiveModel {
            video_id: Set(input.video_id),
            video_path: Set(video_path),
            ..Default::default()
        };
        if let Some(status) = input.status {
            active_model.status = Set(status);
        }

        let media = VideoMediaRepository::insert(&txn, active_model)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;

        info!(
            media_id = media.id,
            video_id = media.video_id,
            status = media.status.label(),
            "Video media created"
        );
        Ok(media)
    }

    pub async fn get(&self, id: i64) -> Result<VideoMediaModel, ServiceError> {
        VideoMediaRepository::find_by_id(self.db.as_ref(), id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| media_not_found(id))
    }

    pub async fn for_video(&self, video_id: i64) -> Result<VideoMediaModel, ServiceError> {
        VideoMediaRepository::find_by_video_id(self.db.as_ref(), video_id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| {
                ServiceError::not_found(format!("video with id={video_id} has no media"))
            })
    }

    pub async fn set_status(
        &self,
        id: i64,
        status: VideoMediaStatus,
    ) -> Result<VideoMediaModel, ServiceError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;
        let existing = VideoMediaRepository::find_by_id(&txn, id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| media_not_found(id))?;
        if existing.status == status {
            return Ok(existing);
        }

        let previous = existing.status;
        let mut active_model = existing.into_active_model();
        active_model.status = Set(status);
        let updated = VideoMediaRepository::update(&txn, active_model)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;

        info!(
            media_id = id,
            from = previous.label(),
            to = status.label(),
            "Video media status changed"
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let rows_affected = VideoMediaRepository::delete_by_id(self.db.as_ref(), id)
            .await
            .map_err(map_delete_error)?;
        if rows_affected == 0 {
            return Err(media_not_found(id));
        }

        info!(media_id = id, "Video media deleted");
        Ok(())
    }
}
