use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// A published (or draft) video.
///
/// `published_at`, `num_likes` and `num_views` are maintained by the store and
/// never taken from caller input; `author_id` is fixed when the row is created.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_video")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(unique)]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub thumbnail: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub is_published: bool,
    pub num_likes: i32,
    pub num_views: i32,
    pub author_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::persistence::user::entity::Entity",
        from = "Column::AuthorId",
        to = "crate::persistence::user::entity::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
    #[sea_orm(has_one = "crate::persistence::video_media::entity::Entity")]
    VideoMedia,
    #[sea_orm(has_many = "crate::persistence::video_tag::entity::Entity")]
    VideoTag,
}

impl Related<crate::persistence::user::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<crate::persistence::video_media::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoMedia.def()
    }
}

impl Related<crate::persistence::video_tag::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VideoTag.def()
    }
}

impl Related<crate::persistence::tag::entity::Entity> for Entity {
    fn to() -> RelationDef {
        crate::persistence::video_tag::entity::Relation::Tag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::persistence::video_tag::entity::Relation::Video.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            published_at: Set(None),
            is_published: Set(false),
            num_likes: Set(0),
            num_views: Set(0),
            ..ActiveModelTrait::default()
        }
    }
}
