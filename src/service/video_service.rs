use crate::persistence::{TagModel, VideoActiveModel, VideoColumn, VideoModel};
use crate::repository::{
    tag_repository::TagRepository, user_repository::UserRepository,
    video_media_repository::VideoMediaRepository, video_repository::VideoRepository,
    video_tag_repository::VideoTagRepository,
};
use crate::service::error::{ServiceError, map_db_error, map_delete_error};
use crate::service::validation::{self, VIDEO_TITLE_MAX_LEN};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, DatabaseConnection, IdenStatic,
    IntoActiveModel, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Caller-supplied fields of a new video.
///
/// Counters, the publish timestamp and the id are never accepted from input;
/// unknown fields are rejected when deserializing.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub slug: String,
    pub author_id: i64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Editable fields of an existing video. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VideoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub slug: Option<String>,
}

fn video_not_found(id: i64) -> ServiceError {
    ServiceError::not_found(format!("video with id={id} was not found"))
}

async fn find_video<C>(db: &C, id: i64) -> Result<VideoModel, ServiceError>
where
    C: ConnectionTrait,
{
    VideoRepository::find_by_id(db, id)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| video_not_found(id))
}

async fn ensure_author_exists<C>(db: &C, author_id: i64) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let exists = UserRepository::find_by_id(db, author_id)
        .await
        .map_err(map_db_error)?
        .is_some();

    if !exists {
        return Err(ServiceError::bad_request(format!(
            "invalid `author_id`: referenced record {author_id} not found"
        )));
    }
    Ok(())
}

async fn ensure_tags_exist<C>(db: &C, tag_ids: &[i64]) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let found = TagRepository::find_by_ids(db, tag_ids)
        .await
        .map_err(map_db_error)?;
    if found.len() == tag_ids.len() {
        return Ok(());
    }

    let missing: Vec<String> = tag_ids
        .iter()
        .filter(|id| !found.iter().any(|tag| tag.id == **id))
        .map(i64::to_string)
        .collect();
    Err(ServiceError::bad_request(format!(
        "invalid `tag_ids`: referenced records {} not found",
        missing.join(", ")
    )))
}

#[derive(Clone)]
pub struct VideoService {
    db: Arc<DatabaseConnection>,
}

impl VideoService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewVideo) -> Result<VideoModel, ServiceError> {
        let title = validation::required_text("title", &input.title, VIDEO_TITLE_MAX_LEN)?;
        let description = validation::non_blank("description", &input.description)?;
        let thumbnail = validation::thumbnail_path(&input.thumbnail)?;
        let slug = validation::slug(&input.slug)?;
        let tag_ids = validation::unique_ids(&input.tag_ids);

        let txn = self.db.begin().await.map_err(map_db_error)?;
        ensure_author_exists(&txn, input.author_id).await?;
        ensure_tags_exist(&txn, &tag_ids).await?;

        let mut active_model = VideoActiveModel {
            title: Set(title),
            description: Set(description),
            thumbnail: Set(thumbnail),
            slug: Set(slug),
            author_id: Set(input.author_id),
            ..Default::default()
        };
        if input.is_published {
            active_model.is_published = Set(true);
            active_model.published_at = Set(Some(Utc::now().into()));
        }

        let video = VideoRepository::insert(&txn, active_model)
            .await
            .map_err(map_db_error)?;
        VideoTagRepository::link_many(&txn, video.id, &tag_ids)
            .await
            .map_err(map_db_error)?;

        txn.commit().await.map_err(map_db_error)?;
        info!(
            video_id = video.id,
            author_id = video.author_id,
            slug = %video.slug,
            "Video created"
        );
        Ok(video)
    }

    pub async fn get(&self, id: i64) -> Result<VideoModel, ServiceError> {
        find_video(self.db.as_ref(), id).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<VideoModel, ServiceError> {
        VideoRepository::find_by_slug(self.db.as_ref(), slug.trim())
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| ServiceError::not_found(format!("video with slug={slug} was not found")))
    }

    pub async fn list(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<Vec<VideoModel>, ServiceError> {
        let page_size = page_size.unwrap_or(20).clamp(1, 200);
        let page = page.unwrap_or(1).max(1);
        let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
            ServiceError::bad_request("page and page_size combination is too large")
        })?;

        VideoRepository::list(self.db.as_ref(), page_size, offset)
            .await
            .map_err(map_db_error)
    }

    pub async fn update(&self, id: i64, changes: VideoChanges) -> Result<VideoModel, ServiceError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;
        let existing = find_video(&txn, id).await?;

        let mut active_model = existing.clone().into_active_model();
        if let Some(title) = changes.title {
            active_model.title = Set(validation::required_text(
                "title",
                &title,
                VIDEO_TITLE_MAX_LEN,
            )?);
        }
        if let Some(description) = changes.description {
            active_model.description = Set(validation::non_blank("description", &description)?);
        }
        if let Some(thumbnail) = changes.thumbnail {
            active_model.thumbnail = Set(validation::thumbnail_path(&thumbnail)?);
        }
        if let Some(slug) = changes.slug {
            active_model.slug = Set(validation::slug(&slug)?);
        }

        if !active_model.is_changed() {
            return Ok(existing);
        }

        let updated = VideoRepository::update(&txn, active_model)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        Ok(updated)
    }

    /// Publishing for the first time stamps `published_at`; unpublishing keeps
    /// the first stamp.
    pub async fn set_published(&self, id: i64, published: bool) -> Result<VideoModel, ServiceError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;
        let existing = find_video(&txn, id).await?;
        if existing.is_published == published {
            return Ok(existing);
        }

        let stamp_needed = published && existing.published_at.is_none();
        let mut active_model = existing.into_active_model();
        active_model.is_published = Set(published);
        if stamp_needed {
            active_model.published_at = Set(Some(Utc::now().into()));
        }

        let updated = VideoRepository::update(&txn, active_model)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;

        info!(video_id = id, published, "Video publish state changed");
        Ok(updated)
    }

    pub async fn record_view(&self, id: i64) -> Result<VideoModel, ServiceError> {
        self.increment(id, VideoColumn::NumViews).await
    }

    pub async fn record_like(&self, id: i64) -> Result<VideoModel, ServiceError> {
        self.increment(id, VideoColumn::NumLikes).await
    }

    async fn increment(&self, id: i64, counter: VideoColumn) -> Result<VideoModel, ServiceError> {
        let rows_affected = VideoRepository::increment(self.db.as_ref(), id, counter)
            .await
            .map_err(map_db_error)?;
        let video = find_video(self.db.as_ref(), id).await?;
        if rows_affected == 0 {
            warn!(video_id = id, counter = counter.as_str(), "Video counter is saturated");
            return Err(ServiceError::conflict(format!(
                "counter `{}` of video id={id} is at its maximum",
                counter.as_str()
            )));
        }
        Ok(video)
    }

    pub async fn tags(&self, id: i64) -> Result<Vec<TagModel>, ServiceError> {
        let video = find_video(self.db.as_ref(), id).await?;
        VideoTagRepository::tags_of(self.db.as_ref(), &video)
            .await
            .map_err(map_db_error)
    }

    /// Replaces the tag set of a video.
    pub async fn set_tags(&self, id: i64, tag_ids: &[i64]) -> Result<Vec<TagModel>, ServiceError> {
        let tag_ids = validation::unique_ids(tag_ids);

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let video = find_video(&txn, id).await?;
        ensure_tags_exist(&txn, &tag_ids).await?;

        VideoTagRepository::unlink_all(&txn, id)
            .await
            .map_err(map_db_error)?;
        VideoTagRepository::link_many(&txn, id, &tag_ids)
            .await
            .map_err(map_db_error)?;

        let tags = VideoTagRepository::tags_of(&txn, &video)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        Ok(tags)
    }

    /// Links tags to a video; tags that are already linked are skipped.
    pub async fn add_tags(&self, id: i64, tag_ids: &[i64]) -> Result<Vec<TagModel>, ServiceError> {
        let tag_ids = validation::unique_ids(tag_ids);

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let video = find_video(&txn, id).await?;
        ensure_tags_exist(&txn, &tag_ids).await?;

        let linked = VideoTagRepository::linked_tag_ids(&txn, id)
            .await
            .map_err(map_db_error)?;
        let to_link: Vec<i64> = tag_ids
            .into_iter()
            .filter(|tag_id| !linked.contains(tag_id))
            .collect();
        VideoTagRepository::link_many(&txn, id, &to_link)
            .await
            .map_err(map_db_error)?;

        let tags = VideoTagRepository::tags_of(&txn, &video)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        Ok(tags)
    }

    pub async fn remove_tags(
        &self,
        id: i64,
        tag_ids: &[i64],
    ) -> Result<Vec<TagModel>, ServiceError> {
        let tag_ids = validation::unique_ids(tag_ids);

        let txn = self.db.begin().await.map_err(map_db_error)?;
        let video = find_video(&txn, id).await?;
        VideoTagRepository::unlink_many(&txn, id, &tag_ids)
            .await
            .map_err(map_db_error)?;

        let tags = VideoTagRepository::tags_of(&txn, &video)
            .await
            .map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        Ok(tags)
    }

    pub async fn videos_for_tag(&self, tag_id: i64) -> Result<Vec<VideoModel>, ServiceError> {
        let tag = TagRepository::find_by_id(self.db.as_ref(), tag_id)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| ServiceError::not_found(format!("tag with id={tag_id} was not found")))?;

        VideoTagRepository::videos_of(self.db.as_ref(), &tag)
            .await
            .map_err(map_db_error)
    }

    /// Deletes a video that has no media row. Its tag links are removed with it.
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;
        find_video(&txn, id).await?;

        let media = VideoMediaRepository::count_by_video(&txn, id)
            .await
            .map_err(map_db_error)?;
        if media > 0 {
            warn!(video_id = id, "Refusing to delete video with media");
            return Err(ServiceError::protected(format!(
                "video with id={id} still has media attached"
            )));
        }

        let rows_affected = VideoRepository::delete_by_id(&txn, id)
            .await
            .map_err(map_delete_error)?;
        if rows_affected == 0 {
            return Err(video_not_found(id));
        }

        txn.commit().await.map_err(map_db_error)?;
        info!(video_id = id, "Video deleted");
        Ok(())
    }
}
