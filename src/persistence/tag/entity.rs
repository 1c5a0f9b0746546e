use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::persistence::video_tag::entity::Entity")]
    VideoTag,
}

impl Related<crate::persistence::video_tag::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoTag.def()
    }
}

impl Related<crate::persistence::video::entity::Entity> for Entity {
    fn to() -> RelationDef {
        crate::persistence::video_tag::entity::Relation::Video.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::persistence::video_tag::entity::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
