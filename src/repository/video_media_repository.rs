use crate::persistence::{
    VideoMediaActiveModel, VideoMediaColumn, VideoMediaEntity, VideoMediaModel,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter,
};

pub(crate) struct VideoMediaRepository;

impl VideoMediaRepository {
    pub(crate) async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<VideoMediaModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoMediaEntity::find_by_id(id).one(db).await
    }

    pub(crate) async fn find_by_video_id<C>(
        db: &C,
        video_id: i64,
    ) -> Result<Option<VideoMediaModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoMediaEntity::find()
            .filter(VideoMediaColumn::VideoId.eq(video_id))
            .one(db)
            .await
    }

    pub(crate) async fn count_by_video<C>(db: &C, video_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoMediaEntity::find()
            .filter(VideoMediaColumn::VideoId.eq(video_id))
            .count(db)
            .await
    }

    pub(crate) async fn insert<C>(
        db: &C,
        active_model: VideoMediaActiveModel,
    ) -> Result<VideoMediaModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    pub(crate) async fn update<C>(
        db: &C,
        active_model: VideoMediaActiveModel,
    ) -> Result<VideoMediaModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.update(db).await
    }

    pub(crate) async fn delete_by_id<C>(db: &C, id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = VideoMediaEntity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
