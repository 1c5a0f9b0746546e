pub(crate) mod tag_repository;
pub(crate) mod user_repository;
pub(crate) mod video_media_repository;
pub(crate) mod video_repository;
pub(crate) mod video_tag_repository;
