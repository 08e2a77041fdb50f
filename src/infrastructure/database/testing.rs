//! Test fixtures: a migrated in-memory SQLite database.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use super::entities::user;
use super::migrator::Migrator;

pub async fn memory_db() -> DatabaseConnection {
    // One connection: every pooled connection would get its own empty database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");
    Migrator::up(&db, None).await.expect("migrate");
    db
}

pub async fn insert_user(db: &DatabaseConnection, id: &str) {
    let now = Utc::now();
    user::ActiveModel {
        id: Set(id.to_string()),
        name: Set(id.to_string()),
        email: Set(format!("{}@example.com", id)),
        email_verified: Set(true),
        image: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("insert user");
}
