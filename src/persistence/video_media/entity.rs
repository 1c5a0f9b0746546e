use sea_orm::{ActiveValue::Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

/// Processing state of an uploaded video file.
///
/// The stored strings are part of the persisted layout; `UploadStarted` keeps
/// the historical `UPLOADED_STARTED` spelling.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoMediaStatus {
    #[default]
    #[sea_orm(string_value = "UPLOADED_STARTED")]
    #[serde(rename = "UPLOADED_STARTED")]
    UploadStarted,
    #[sea_orm(string_value = "PROCESSING_STARTED")]
    ProcessingStarted,
    #[sea_orm(string_value = "PROCESSING_FINISHED")]
    ProcessingFinished,
    #[sea_orm(string_value = "PROCESSING_ERROR")]
    ProcessingError,
}

impl VideoMediaStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::UploadStarted => "Upload started",
            Self::ProcessingStarted => "Processing started",
            Self::ProcessingFinished => "Processing finished",
            Self::ProcessingError => "Processing error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "core_videomedia")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    pub video_path: String,
    pub status: VideoMediaStatus,
    #[sea_orm(unique)]
    pub video_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::persistence::video::entity::Entity",
        from = "Column::VideoId",
        to = "crate::persistence::video::entity::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Video,
}

impl Related<crate::persistence::video::entity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Video.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            status: Set(VideoMediaStatus::default()),
            ..ActiveModelTrait::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveEnum, Iterable};

    #[test]
    fn stored_values_match_persisted_layout() {
        let stored: Vec<String> = VideoMediaStatus::iter().map(|status| status.to_value()).collect();
        assert_eq!(
            stored,
            [
                "UPLOADED_STARTED",
                "PROCESSING_STARTED",
                "PROCESSING_FINISHED",
                "PROCESSING_ERROR"
            ]
        );
    }

    #[test]
    fn serde_uses_stored_values() {
        let json = serde_json::to_string(&VideoMediaStatus::UploadStarted).unwrap();
        assert_eq!(json, "\"UPLOADED_STARTED\"");

        let parsed: VideoMediaStatus = serde_json::from_str("\"PROCESSING_ERROR\"").unwrap();
        assert_eq!(parsed, VideoMediaStatus::ProcessingError);
    }

    #[test]
    fn new_active_model_starts_as_upload_started() {
        let active = ActiveModel::new();
        assert_eq!(active.status, Set(VideoMediaStatus::UploadStarted));
        assert_eq!(VideoMediaStatus::default().label(), "Upload started");
    }
}
