use crate::persistence::{
    TagColumn, TagEntity, TagModel, VideoColumn, VideoEntity, VideoModel, VideoTagActiveModel,
    VideoTagColumn, VideoTagEntity,
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

pub(crate) struct VideoTagRepository;

impl VideoTagRepository {
    pub(crate) async fn linked_tag_ids<C>(db: &C, video_id: i64) -> Result<Vec<i64>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoTagEntity::find()
            .select_only()
            .column(VideoTagColumn::TagId)
            .filter(VideoTagColumn::VideoId.eq(video_id))
            .order_by_asc(VideoTagColumn::TagId)
            .into_tuple()
            .all(db)
            .await
    }

    pub(crate) async fn link_many<C>(db: &C, video_id: i64, tag_ids: &[i64]) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        if tag_ids.is_empty() {
            return Ok(());
        }

        let rows = tag_ids.iter().map(|tag_id| VideoTagActiveModel {
            video_id: Set(video_id),
            tag_id: Set(*tag_id),
            ..Default::default()
        });
        VideoTagEntity::insert_many(rows).exec(db).await?;
        Ok(())
    }

    pub(crate) async fn unlink_many<C>(db: &C, video_id: i64, tag_ids: &[i64]) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        if tag_ids.is_empty() {
            return Ok(0);
        }

        let result = VideoTagEntity::delete_many()
            .filter(VideoTagColumn::VideoId.eq(video_id))
            .filter(VideoTagColumn::TagId.is_in(tag_ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub(crate) async fn unlink_all<C>(db: &C, video_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = VideoTagEntity::delete_many()
            .filter(VideoTagColumn::VideoId.eq(video_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub(crate) async fn tags_of<C>(db: &C, video: &VideoModel) -> Result<Vec<TagModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        video
            .find_related(TagEntity)
            .order_by_asc(TagColumn::Name)
            .all(db)
            .await
    }

    pub(crate) async fn videos_of<C>(db: &C, tag: &TagModel) -> Result<Vec<VideoModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        tag.find_related(VideoEntity)
            .order_by_asc(VideoColumn::Id)
            .all(db)
            .await
    }
}
