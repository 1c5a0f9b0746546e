use crate::persistence::{UserActiveModel, UserEntity, UserModel};
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait};

pub(crate) struct UserRepository;

impl UserRepository {
    pub(crate) async fn insert<C>(db: &C, active_model: UserActiveModel) -> Result<UserModel, DbErr>
    where
        C: ConnectionTrait,
    {
        active_model.insert(db).await
    }

    pub(crate) async fn find_by_id<C>(db: &C, id: i64) -> Result<Option<UserModel>, DbErr>
    where
        C: ConnectionTrait,
    {
        UserEntity::find_by_id(id).one(db).await
    }

    pub(crate) async fn delete_by_id<C>(db: &C, id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = UserEntity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected)
    }
}
