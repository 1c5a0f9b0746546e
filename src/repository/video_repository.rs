use crate::persistence::{VideoActiveModel, VideoColumn, VideoEntity, VideoModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};

pub(crate) struct VideoRepository;

impl VideoRepository {
    pub(crate) async fn list<C>(
        db: &C,
        page_size: u64,
        offset: u64,
    ) -> Result<Vec<VideoModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoEntity::find()
            .order_by_asc(VideoColumn::Id)
            .limit(page_size)
            .offset(offset)
            .all(db)
            .await
    }

    pub(crate) async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<VideoModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoEntity::find_by_id(id).one(db).await
    }

    pub(crate) async fn find_by_slug<C>(db: &C, slug: &str) -> Result<Option<VideoModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoEntity::find()
            .filter(VideoColumn::Slug.eq(slug))
            .one(db)
            .await
    }

    pub(crate) async fn count_by_author<C>(db: &C, author_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        VideoEntity::find()
            .filter(VideoColumn::AuthorId.eq(author_id))
            .count(db)
            .await
    }

    pub(crate) async fn insert<C>(
        db: &C,
        active_model: VideoActiveModel,
    ) -> Result<VideoModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    pub(crate) async fn update<C>(
        db: &C,
        active_model: VideoActiveModel,
    ) -> Result<VideoModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.update(db).await
    }

    /// Adds one to a counter column in a single statement.
    ///
    /// A counter already at `i32::MAX` is left untouched, so zero rows
    /// affected means either a missing video or a saturated counter.
    pub(crate) async fn increment<C>(db: &C, id: i64, counter: VideoColumn) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = VideoEntity::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .filter(VideoColumn::Id.eq(id))
            .filter(counter.lt(i32::MAX))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub(crate) async fn delete_by_id<C>(db: &C, id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = VideoEntity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
