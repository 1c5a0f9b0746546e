pub mod error;
pub mod tag_service;
pub mod user_service;
pub mod validation;
pub mod video_media_service;
pub mod video_service;

pub use error::{ServiceError, ServiceErrorKind};
pub use tag_service::{NewTag, TagService};
pub use user_service::{NewUser, UserService};
pub use video_media_service::{NewVideoMedia, VideoMediaService};
pub use video_service::{NewVideo, VideoChanges, VideoService};
