use crate::persistence::{TagActiveModel, TagColumn, TagEntity, TagModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub(crate) struct TagRepository;

impl TagRepository {
    pub(crate) async fn list<C>(db: &C) -> Result<Vec<TagModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        TagEntity::find()
            .order_by_asc(TagColumn::Name)
            .all(db)
            .await
    }

    pub(crate) async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<TagModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        TagEntity::find_by_id(id).one(db).await
    }

    pub(crate) async fn find_by_name<C>(db: &C, name: &str) -> Result<Option<TagModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        TagEntity::find()
            .filter(TagColumn::Name.eq(name))
            .one(db)
            .await
    }

    pub(crate) async fn find_by_ids<C>(db: &C, ids: &[i64]) -> Result<Vec<TagModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        TagEntity::find()
            .filter(TagColumn::Id.is_in(ids.iter().copied()))
            .order_by_asc(TagColumn::Id)
            .all(db)
            .await
    }

    pub(crate) async fn insert<C>(db: &C, active_model: TagActiveModel) -> Result<TagModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    pub(crate) async fn update<C>(db: &C, active_model: TagActiveModel) -> Result<TagModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.update(db).await
    }

    pub(crate) async fn delete_by_id<C>(db: &C, id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = TagEntity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
