//! SeaORM entities for the catalog tables.

pub mod tag {
    pub mod entity;
}
pub mod user {
    pub mod entity;
}
pub mod video {
    pub mod entity;
}
pub mod video_media {
    pub mod entity;
}
pub mod video_tag {
    pub mod entity;
}

pub use crate::persistence::tag::entity::{
    ActiveModel as TagActiveModel, Column as TagColumn, Entity as TagEntity, Model as TagModel,
};
pub use crate::persistence::user::entity::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};
pub use crate::persistence::video::entity::{
    ActiveModel as VideoActiveModel, Column as VideoColumn, Entity as VideoEntity,
    Model as VideoModel,
};
pub use crate::persistence::video_media::entity::{
    ActiveModel as VideoMediaActiveModel, Column as VideoMediaColumn, Entity as VideoMediaEntity,
    Model as VideoMediaModel, VideoMediaStatus,
};
pub use crate::persistence::video_tag::entity::{
    ActiveModel as VideoTagActiveModel, Column as VideoTagColumn, Entity as VideoTagEntity,
    Model as VideoTagModel,
};
