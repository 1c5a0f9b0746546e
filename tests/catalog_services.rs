mod common;

use common::{create_user, create_video, migrated_db, new_video};
use core_management::persistence::VideoMediaStatus;
use core_management::service::{
    NewTag, NewVideo, NewVideoMedia, ServiceErrorKind, TagService, UserService, VideoChanges,
    VideoMediaService, VideoService,
};
use sea_orm::ConnectionTrait;

#[tokio::test]
async fn second_tag_with_same_name_conflicts() {
    let db = migrated_db().await;
    let tags = TagService::new(db.clone());

    tags.create(NewTag::new("rust")).await.unwrap();
    let error = tags.create(NewTag::new(" rust ")).await.unwrap_err();

    assert_eq!(error.kind(), ServiceErrorKind::Conflict);
    assert_eq!(tags.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn tag_name_longer_than_fifty_characters_is_rejected() {
    let db = migrated_db().await;
    let tags = TagService::new(db.clone());

    let error = tags.create(NewTag::new("t".repeat(51))).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::BadRequest);
}

#[tokio::test]
async fn second_video_with_same_title_or_slug_conflicts() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let videos = VideoService::new(db.clone());

    videos
        .create(new_video(author.id, "Intro to Rust", "intro-to-rust"))
        .await
        .unwrap();

    let same_title = videos
        .create(new_video(author.id, "Intro to Rust", "intro-to-rust-2"))
        .await
        .unwrap_err();
    assert_eq!(same_title.kind(), ServiceErrorKind::Conflict);

    let same_slug = videos
        .create(new_video(author.id, "Rust, the intro", "intro-to-rust"))
        .await
        .unwrap_err();
    assert_eq!(same_slug.kind(), ServiceErrorKind::Conflict);

    assert_eq!(videos.list(None, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn new_video_starts_unpublished_with_zero_counters() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;

    let video = create_video(&db, author.id, "Intro", "intro").await;

    assert_eq!(video.num_likes, 0);
    assert_eq!(video.num_views, 0);
    assert!(!video.is_published);
    assert!(video.published_at.is_none());
    assert_eq!(video.thumbnail, "thumbnails/intro.png");
    assert_eq!(video.author_id, author.id);
}

#[tokio::test]
async fn video_requires_an_existing_author() {
    let db = migrated_db().await;
    let videos = VideoService::new(db.clone());

    let error = videos
        .create(new_video(404, "Orphan", "orphan"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::BadRequest);
    assert!(error.message().contains("author_id"));
}

#[tokio::test]
async fn system_set_fields_cannot_come_from_input() {
    let payload = serde_json::json!({
        "title": "Intro",
        "description": "desc",
        "thumbnail": "intro.png",
        "slug": "intro",
        "author_id": 1,
        "num_likes": 1000,
    });
    assert!(serde_json::from_value::<NewVideo>(payload).is_err());

    let changes = serde_json::json!({ "num_views": 5 });
    assert!(serde_json::from_value::<VideoChanges>(changes).is_err());

    let changes = serde_json::json!({ "author_id": 2 });
    assert!(serde_json::from_value::<VideoChanges>(changes).is_err());

    let changes = serde_json::json!({ "title": "Renamed" });
    let changes: VideoChanges = serde_json::from_value(changes).unwrap();
    assert_eq!(changes.title.as_deref(), Some("Renamed"));
}

#[tokio::test]
async fn deleting_an_author_is_protected_while_videos_exist() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let users = UserService::new(db.clone());
    let videos = VideoService::new(db.clone());

    let error = users.delete(author.id).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Protected);
    assert!(users.get(author.id).await.is_ok());

    videos.delete(video.id).await.unwrap();
    users.delete(author.id).await.unwrap();
    assert_eq!(
        users.get(author.id).await.unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
}

#[tokio::test]
async fn deleting_a_video_is_protected_while_media_exists() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let videos = VideoService::new(db.clone());
    let media = VideoMediaService::new(db.clone());

    let attached = media
        .create(NewVideoMedia::new(video.id, "media/uploads/1"))
        .await
        .unwrap();

    let error = videos.delete(video.id).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Protected);
    assert!(videos.get(video.id).await.is_ok());

    media.delete(attached.id).await.unwrap();
    videos.delete(video.id).await.unwrap();
    assert_eq!(
        videos.get(video.id).await.unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
}

#[tokio::test]
async fn media_status_defaults_to_upload_started() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let media = VideoMediaService::new(db.clone());

    let created = media
        .create(NewVideoMedia::new(video.id, "media/uploads/1"))
        .await
        .unwrap();
    assert_eq!(created.status, VideoMediaStatus::UploadStarted);

    let found = media.for_video(video.id).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn media_status_can_be_given_and_changed() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let media = VideoMediaService::new(db.clone());

    let created = media
        .create(
            NewVideoMedia::new(video.id, "media/uploads/1")
                .with_status(VideoMediaStatus::ProcessingStarted),
        )
        .await
        .unwrap();
    assert_eq!(created.status, VideoMediaStatus::ProcessingStarted);

    let finished = media
        .set_status(created.id, VideoMediaStatus::ProcessingFinished)
        .await
        .unwrap();
    assert_eq!(finished.status, VideoMediaStatus::ProcessingFinished);
    assert_eq!(
        media.get(created.id).await.unwrap().status,
        VideoMediaStatus::ProcessingFinished
    );
}

#[tokio::test]
async fn a_video_has_at_most_one_media_row() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let media = VideoMediaService::new(db.clone());

    media
        .create(NewVideoMedia::new(video.id, "media/uploads/1"))
        .await
        .unwrap();
    let error = media
        .create(NewVideoMedia::new(video.id, "media/uploads/2"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Conflict);

    let error = media
        .create(NewVideoMedia::new(9999, "media/uploads/3"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::BadRequest);
}

#[tokio::test]
async fn publishing_stamps_published_at_once() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let videos = VideoService::new(db.clone());

    let published = videos.set_published(video.id, true).await.unwrap();
    assert!(published.is_published);
    let stamp = published.published_at.unwrap();

    let unpublished = videos.set_published(video.id, false).await.unwrap();
    assert!(!unpublished.is_published);
    assert_eq!(unpublished.published_at, Some(stamp));

    let republished = videos.set_published(video.id, true).await.unwrap();
    assert_eq!(republished.published_at, Some(stamp));
}

#[tokio::test]
async fn creating_a_published_video_stamps_published_at() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let videos = VideoService::new(db.clone());

    let mut input = new_video(author.id, "Live", "live");
    input.is_published = true;
    let video = videos.create(input).await.unwrap();

    assert!(video.is_published);
    assert!(video.published_at.is_some());
}

#[tokio::test]
async fn views_and_likes_increment_by_one() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let videos = VideoService::new(db.clone());

    videos.record_view(video.id).await.unwrap();
    let viewed = videos.record_view(video.id).await.unwrap();
    assert_eq!(viewed.num_views, 2);
    assert_eq!(viewed.num_likes, 0);

    let liked = videos.record_like(video.id).await.unwrap();
    assert_eq!(liked.num_likes, 1);
    assert_eq!(liked.num_views, 2);

    let error = videos.record_view(9999).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::NotFound);
}

#[tokio::test]
async fn saturated_counter_is_refused_and_row_stays_readable() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let videos = VideoService::new(db.clone());

    db.execute_unprepared(&format!(
        "UPDATE core_video SET num_likes = 2147483647 WHERE id = {}",
        video.id
    ))
    .await
    .unwrap();

    let error = videos.record_like(video.id).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Conflict);

    let reloaded = videos.get(video.id).await.unwrap();
    assert_eq!(reloaded.num_likes, i32::MAX);
    assert_eq!(
        videos.find_by_slug("intro").await.unwrap().num_likes,
        2147483647
    );

    let viewed = videos.record_view(video.id).await.unwrap();
    assert_eq!(viewed.num_views, 1);
}

#[tokio::test]
async fn update_changes_only_editable_fields() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let other = create_video(&db, author.id, "Other", "other").await;
    let videos = VideoService::new(db.clone());

    let updated = videos
        .update(
            video.id,
            VideoChanges {
                title: Some("Intro, revised".to_string()),
                thumbnail: Some("thumbnails/revised.png".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Intro, revised");
    assert_eq!(updated.thumbnail, "thumbnails/revised.png");
    assert_eq!(updated.slug, "intro");
    assert_eq!(updated.author_id, author.id);

    let error = videos
        .update(
            video.id,
            VideoChanges {
                slug: Some(other.slug.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Conflict);

    let error = videos
        .update(
            video.id,
            VideoChanges {
                slug: Some("not a slug".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::BadRequest);

    let unchanged = videos
        .update(video.id, VideoChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged, updated);
}

#[tokio::test]
async fn tags_link_and_unlink_without_duplicates() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let video = create_video(&db, author.id, "Intro", "intro").await;
    let tags = TagService::new(db.clone());
    let videos = VideoService::new(db.clone());

    let rust = tags.create(NewTag::new("rust")).await.unwrap();
    let intro = tags.create(NewTag::new("beginner")).await.unwrap();

    let linked = videos.add_tags(video.id, &[rust.id, rust.id]).await.unwrap();
    assert_eq!(linked, vec![rust.clone()]);

    let linked = videos
        .add_tags(video.id, &[rust.id, intro.id])
        .await
        .unwrap();
    assert_eq!(linked, vec![intro.clone(), rust.clone()]);

    let linked = videos.remove_tags(video.id, &[intro.id]).await.unwrap();
    assert_eq!(linked, vec![rust.clone()]);

    let linked = videos.set_tags(video.id, &[intro.id]).await.unwrap();
    assert_eq!(linked, vec![intro.clone()]);
    assert_eq!(videos.videos_for_tag(intro.id).await.unwrap(), vec![video.clone()]);
    assert!(videos.videos_for_tag(rust.id).await.unwrap().is_empty());

    let error = videos.add_tags(video.id, &[9999]).await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::BadRequest);
    assert_eq!(videos.tags(video.id).await.unwrap(), vec![intro]);
}

#[tokio::test]
async fn deleting_a_tag_keeps_its_videos() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    let tags = TagService::new(db.clone());
    let videos = VideoService::new(db.clone());

    let rust = tags.create(NewTag::new("rust")).await.unwrap();
    let mut input = new_video(author.id, "Intro", "intro");
    input.tag_ids = vec![rust.id];
    let video = videos.create(input).await.unwrap();
    assert_eq!(videos.tags(video.id).await.unwrap(), vec![rust.clone()]);

    tags.delete(rust.id).await.unwrap();

    assert!(videos.tags(video.id).await.unwrap().is_empty());
    assert_eq!(videos.get(video.id).await.unwrap(), video);
    assert_eq!(
        tags.get(rust.id).await.unwrap_err().kind(),
        ServiceErrorKind::NotFound
    );
}

#[tokio::test]
async fn tags_can_be_found_and_renamed() {
    let db = migrated_db().await;
    let tags = TagService::new(db.clone());

    let tag = tags.create(NewTag::new("rust")).await.unwrap();
    tags.create(NewTag::new("go")).await.unwrap();

    assert_eq!(tags.find_by_name("rust").await.unwrap(), tag);

    let renamed = tags.rename(tag.id, "rustlang").await.unwrap();
    assert_eq!(renamed.name, "rustlang");

    let error = tags.rename(tag.id, "go").await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Conflict);

    let names: Vec<String> = tags
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|tag| tag.name)
        .collect();
    assert_eq!(names, ["go", "rustlang"]);
}

#[tokio::test]
async fn videos_are_listed_by_page_and_found_by_slug() {
    let db = migrated_db().await;
    let author = create_user(&db, "ana").await;
    for index in 0..5 {
        create_video(&db, author.id, &format!("Part {index}"), &format!("part-{index}")).await;
    }
    let videos = VideoService::new(db.clone());

    let page = videos.list(Some(2), Some(2)).await.unwrap();
    let slugs: Vec<&str> = page.iter().map(|video| video.slug.as_str()).collect();
    assert_eq!(slugs, ["part-2", "part-3"]);

    let found = videos.find_by_slug("part-4").await.unwrap();
    assert_eq!(found.title, "Part 4");

    let error = videos.find_by_slug("missing").await.unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::NotFound);
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let db = migrated_db().await;
    create_user(&db, "ana").await;

    let error = UserService::new(db.clone())
        .create(core_management::service::NewUser::new("ana"))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ServiceErrorKind::Conflict);
}
