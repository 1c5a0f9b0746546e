#![allow(dead_code)]

use core_management::config::DatabaseConfig;
use core_management::db;
use core_management::persistence::{UserModel, VideoModel};
use core_management::service::{NewUser, NewVideo, UserService, VideoService};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Fresh in-memory database with every migration applied.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn migrated_db() -> Arc<DatabaseConnection> {
    let config = DatabaseConfig::new("sqlite::memory:").with_max_connections(1);
    let connection = db::connect(&config).await.unwrap();
    db::migrate(&connection).await.unwrap();
    Arc::new(connection)
}

pub async fn create_user(db: &Arc<DatabaseConnection>, username: &str) -> UserModel {
    UserService::new(db.clone())
        .create(NewUser::new(username).with_email(format!("{username}@example.com")))
        .await
        .unwrap()
}

pub fn new_video(author_id: i64, title: &str, slug: &str) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        description: format!("All about {title}"),
        thumbnail: format!("{slug}.png"),
        slug: slug.to_string(),
        author_id,
        is_published: false,
        tag_ids: Vec::new(),
    }
}

pub async fn create_video(
    db: &Arc<DatabaseConnection>,
    author_id: i64,
    title: &str,
    slug: &str,
) -> VideoModel {
    VideoService::new(db.clone())
        .create(new_video(author_id, title, slug))
        .await
        .unwrap()
}
