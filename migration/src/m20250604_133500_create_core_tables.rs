use sea_orm_migration::prelude::*;

const VIDEO_MEDIA_STATUSES: [&str; 4] = [
    "UPLOADED_STARTED",
    "PROCESSING_STARTED",
    "PROCESSING_FINISHED",
    "PROCESSING_ERROR",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tags table
        manager
            .create_table(
                Table::create()
                    .table(Tag::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tag::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tag::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Videos table
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Video::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Video::Title)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Video::Description).text().not_null())
                    .col(ColumnDef::new(Video::Thumbnail).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Video::Slug)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Video::PublishedAt).timestamp_with_time_zone().null())
                    .col(
                        ColumnDef::new(Video::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Video::NumLikes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Video::NumViews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Video::AuthorId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_core_video_author_id")
                            .from(Video::Table, Video::AuthorId)
                            .to(AuthUser::Table, AuthUser::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_core_video_author_id")
                    .table(Video::Table)
                    .col(Video::AuthorId)
                    .to_owned(),
            )
            .await?;

        // Video <-> Tag join table
        manager
            .create_table(
                Table::create()
                    .table(VideoTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoTags::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoTags::VideoId).big_integer().not_null())
                    .col(ColumnDef::new(VideoTags::TagId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_core_video_tags_video_id")
                            .from(VideoTags::Table, VideoTags::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_core_video_tags_tag_id")
                            .from(VideoTags::Table, VideoTags::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_core_video_tags_video_id_tag_id")
                    .table(VideoTags::Table)
                    .col(VideoTags::VideoId)
                    .col(VideoTags::TagId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_core_video_tags_tag_id")
                    .table(VideoTags::Table)
                    .col(VideoTags::TagId)
                    .to_owned(),
            )
            .await?;

        // Video media table, one row per video
        manager
            .create_table(
                Table::create()
                    .table(VideoMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VideoMedia::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VideoMedia::VideoPath).string_len(255).not_null())
                    .col(
                        ColumnDef::new(VideoMedia::Status)
                            .string_len(20)
                            .not_null()
                            .default(VIDEO_MEDIA_STATUSES[0])
                            .check(Expr::col(VideoMedia::Status).is_in(VIDEO_MEDIA_STATUSES)),
                    )
                    .col(
                        ColumnDef::new(VideoMedia::VideoId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_core_videomedia_video_id")
                            .from(VideoMedia::Table, VideoMedia::VideoId)
                            .to(Video::Table, Video::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order of creation
        manager
            .drop_table(Table::drop().table(VideoMedia::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VideoTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Video::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AuthUser {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Tag {
    #[sea_orm(iden = "core_tag")]
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Video {
    #[sea_orm(iden = "core_video")]
    Table,
    Id,
    Title,
    Description,
    Thumbnail,
    Slug,
    PublishedAt,
    IsPublished,
    NumLikes,
    NumViews,
    AuthorId,
}

#[derive(DeriveIden)]
enum VideoTags {
    #[sea_orm(iden = "core_video_tags")]
    Table,
    Id,
    VideoId,
    TagId,
}

#[derive(DeriveIden)]
enum VideoMedia {
    #[sea_orm(iden = "core_videomedia")]
    Table,
    Id,
    VideoPath,
    Status,
    VideoId,
}
