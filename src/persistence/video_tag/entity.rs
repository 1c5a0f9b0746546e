use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_video_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    pub video_id: i64,
    pub tag_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::persistence::video::entity::Entity",
        from = "Column::VideoId",
        to = "crate::persistence::video::entity::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Video,
    #[sea_orm(
        belongs_to = "crate::persistence::tag::entity::Entity",
        from = "Column::TagId",
        to = "crate::persistence::tag::entity::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<crate::persistence::video::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl Related<crate::persistence::tag::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
