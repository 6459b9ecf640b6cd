use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;

use crate::error::GalleryResult;
use crate::photo::Photo;

pub type DbPool = SqlitePool;

const CREATE_PHOTOS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS photos (
    id INTEGER PRIMARY KEY,
    width INTEGER NOT NULL,
    height INTEGER NOT NULL,
    shot_time TEXT,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_SHOT_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_photos_shot_time ON photos(shot_time)";

pub async fn create_db_pool(database_path: &str, max_connections: u32) -> GalleryResult<DbPool> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(database_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::new()
        .filename(database_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    initialize_schema(&pool).await?;
    Ok(pool)
}

/// Single-connection in-memory database, kept open for the pool's lifetime.
pub async fn create_in_memory_pool() -> GalleryResult<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    initialize_schema(&pool).await?;
    Ok(pool)
}

async fn initialize_schema(pool: &DbPool) -> GalleryResult<()> {
    sqlx::query(CREATE_PHOTOS_TABLE).execute(pool).await?;
    sqlx::query(CREATE_SHOT_TIME_INDEX).execute(pool).await?;
    Ok(())
}

/// Supplies the photos the gallery is built from.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// All photos, newest `shot_time` first.
    async fn list_photos(&self) -> GalleryResult<Vec<Photo>>;
}

#[derive(Clone)]
pub struct PhotoRepository {
    pool: DbPool,
}

impl PhotoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn insert_photo(
        &self,
        width: i32,
        height: i32,
        shot_time: Option<DateTime<Utc>>,
    ) -> GalleryResult<i64> {
        let result =
            sqlx::query("INSERT INTO photos (width, height, shot_time, created_at) VALUES (?, ?, ?, ?)")
                .bind(width)
                .bind(height)
                .bind(shot_time)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_photos(&self) -> GalleryResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM photos")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes the given ids and returns how many rows were removed.
    pub async fn delete_photos(&self, ids: &[i64]) -> GalleryResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let sql = format!("DELETE FROM photos WHERE id IN ({})", placeholders);

        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        let deleted = query.execute(&self.pool).await?.rows_affected();
        info!("Deleted {} photos", deleted);
        Ok(deleted)
    }
}

#[async_trait]
impl PhotoSource for PhotoRepository {
    async fn list_photos(&self) -> GalleryResult<Vec<Photo>> {
        let photos = sqlx::query_as::<_, Photo>(
            "SELECT id, width, height, shot_time, created_at
             FROM photos
             ORDER BY shot_time IS NULL, shot_time DESC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    async fn repository() -> PhotoRepository {
        PhotoRepository::new(create_in_memory_pool().await.unwrap())
    }

    #[tokio::test]
    async fn test_list_photos_newest_first() {
        let repo = repository().await;
        let old = repo
            .insert_photo(800, 600, Some(Utc.with_ymd_and_hms(2010, 5, 25, 10, 0, 0).unwrap()))
            .await
            .unwrap();
        let undated = repo.insert_photo(800, 600, None).await.unwrap();
        let new = repo
            .insert_photo(600, 800, Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()))
            .await
            .unwrap();

        let photos = repo.list_photos().await.unwrap();
        let ids: Vec<i64> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![new, old, undated]);

        assert_eq!(photos[0].width, 600);
        assert_eq!(
            photos[0].shot_time,
            Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap())
        );
        assert!(photos[2].shot_time.is_none());
        assert!(photos[2].created_at.is_some());
    }

    #[tokio::test]
    async fn test_delete_photos() {
        let repo = repository().await;
        let a = repo.insert_photo(10, 10, None).await.unwrap();
        let b = repo.insert_photo(10, 10, None).await.unwrap();
        let c = repo.insert_photo(10, 10, None).await.unwrap();

        assert_eq!(repo.count_photos().await.unwrap(), 3);
        assert_eq!(repo.delete_photos(&[a, c, 9999]).await.unwrap(), 2);
        assert_eq!(repo.count_photos().await.unwrap(), 1);
        assert_eq!(repo.delete_photos(&[]).await.unwrap(), 0);

        let remaining: Vec<i64> = repo
            .list_photos()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(remaining, vec![b]);
    }

    #[tokio::test]
    async fn test_file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("database").join("moments.db");

        let pool = create_db_pool(path.to_str().unwrap(), 2).await.unwrap();
        let repo = PhotoRepository::new(pool);
        repo.insert_photo(100, 100, None).await.unwrap();

        assert!(path.exists());
        assert_eq!(repo.list_photos().await.unwrap().len(), 1);
    }
}
