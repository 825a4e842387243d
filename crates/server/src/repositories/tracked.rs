use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{Quality, Site, TrackedRelease};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid row '{name}': {reason}")]
    InvalidRow { name: String, reason: String },
}

/// Common SELECT fields for tracked release queries
const SELECT_TRACKED: &str = r#"
    SELECT name, site, next_check, episode, quality
    FROM tracked_release
"#;

pub struct TrackedRepository;

impl TrackedRepository {
    /// Start tracking a release
    pub async fn create(pool: &SqlitePool, release: &TrackedRelease) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO tracked_release (name, site, next_check, episode, quality)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&release.name)
        .bind(release.site.as_str())
        .bind(release.next_check_not_before.timestamp())
        .bind(release.expected_episode)
        .bind(release.quality.as_str())
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<TrackedRelease>, StoreError> {
        let query = format!("{} WHERE name = $1", SELECT_TRACKED);
        let row = sqlx::query_as::<_, TrackedRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await?;

        row.map(TrackedRelease::try_from).transpose()
    }

    /// Records whose next check time has been reached
    pub async fn list_due(
        pool: &SqlitePool,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrackedRelease>, StoreError> {
        let query = format!(
            "{} WHERE next_check <= $1 ORDER BY next_check ASC, name ASC",
            SELECT_TRACKED
        );
        let rows = sqlx::query_as::<_, TrackedRow>(&query)
            .bind(now.timestamp())
            .fetch_all(pool)
            .await?;

        rows.into_iter().map(TrackedRelease::try_from).collect()
    }

    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<TrackedRelease>, StoreError> {
        let query = format!("{} ORDER BY next_check ASC, name ASC", SELECT_TRACKED);
        let rows = sqlx::query_as::<_, TrackedRow>(&query)
            .fetch_all(pool)
            .await?;

        rows.into_iter().map(TrackedRelease::try_from).collect()
    }

    /// Move a record to its next expected episode.
    /// Returns false when no record has that name.
    pub async fn advance(
        pool: &SqlitePool,
        name: &str,
        expected_episode: i32,
        next_check_not_before: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE tracked_release SET
                episode = $1,
                next_check = $2
            WHERE name = $3
            "#,
        )
        .bind(expected_episode)
        .bind(next_check_not_before.timestamp())
        .bind(name)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &SqlitePool, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tracked_release WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Read-only view of the store, handed to the HTTP layer
#[async_trait]
pub trait TrackedReader: Send + Sync {
    /// Every tracked record ordered by next check time
    async fn list_all(&self) -> Result<Vec<TrackedRelease>, StoreError>;
}

/// Store operations used by the reconciliation loop
#[async_trait]
pub trait TrackedStore: Send + Sync {
    async fn list_due(&self, now: DateTime<Utc>) -> Result<Vec<TrackedRelease>, StoreError>;

    async fn advance(
        &self,
        name: &str,
        expected_episode: i32,
        next_check_not_before: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    async fn delete(&self, name: &str) -> Result<bool, StoreError>;
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteTrackedStore {
    pool: SqlitePool,
}

impl SqliteTrackedStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TrackedReader for SqliteTrackedStore {
    async fn list_all(&self) -> Result<Vec<TrackedRelease>, StoreError> {
        TrackedRepository::list_all(&self.pool).await
    }
}

#[async_trait]
impl TrackedStore for SqliteTrackedStore {
    async fn list_due(&self, now: DateTime<Utc>) -> Result<Vec<TrackedRelease>, StoreError> {
        TrackedRepository::list_due(&self.pool, now).await
    }

    async fn advance(
        &self,
        name: &str,
        expected_episode: i32,
        next_check_not_before: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        TrackedRepository::advance(&self.pool, name, expected_episode, next_check_not_before).await
    }

    async fn delete(&self, name: &str) -> Result<bool, StoreError> {
        TrackedRepository::delete(&self.pool, name).await
    }
}

/// Internal row type for mapping SQLite results
#[derive(Debug, sqlx::FromRow)]
struct TrackedRow {
    name: String,
    site: String,
    next_check: i64,
    episode: i32,
    quality: String,
}

impl TryFrom<TrackedRow> for TrackedRelease {
    type Error = StoreError;

    fn try_from(row: TrackedRow) -> Result<Self, Self::Error> {
        let invalid = |reason: String| StoreError::InvalidRow {
            name: row.name.clone(),
            reason,
        };

        let site: Site = row.site.parse().map_err(invalid)?;
        let quality: Quality = row.quality.parse().map_err(invalid)?;
        let next_check_not_before = DateTime::from_timestamp(row.next_check, 0)
            .ok_or_else(|| invalid(format!("next_check {} out of range", row.next_check)))?;

        Ok(Self {
            name: row.name,
            site,
            expected_episode: row.episode,
            quality,
            next_check_not_before,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_pool;
    use chrono::{Duration, TimeZone};

    fn release(name: &str, episode: i32, next_check: DateTime<Utc>) -> TrackedRelease {
        TrackedRelease {
            name: name.to_string(),
            site: Site::EraiRaws,
            expected_episode: episode,
            quality: Quality::P1080,
            next_check_not_before: next_check,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 7, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = memory_pool().await;
        let record = release("Show", 4, now());
        TrackedRepository::create(&pool, &record).await.unwrap();

        let loaded = TrackedRepository::get_by_name(&pool, "Show").await.unwrap();
        assert_eq!(loaded, Some(record));
        assert!(TrackedRepository::get_by_name(&pool, "Other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_future_records_are_not_due() {
        let pool = memory_pool().await;
        TrackedRepository::create(&pool, &release("Past", 1, now() - Duration::hours(1)))
            .await
            .unwrap();
        TrackedRepository::create(&pool, &release("Exact", 1, now()))
            .await
            .unwrap();
        TrackedRepository::create(&pool, &release("Future", 1, now() + Duration::seconds(1)))
            .await
            .unwrap();

        let due = TrackedRepository::list_due(&pool, now()).await.unwrap();
        let names: Vec<_> = due.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Past", "Exact"]);
    }

    #[tokio::test]
    async fn test_list_all_ordered_by_next_check() {
        let pool = memory_pool().await;
        TrackedRepository::create(&pool, &release("Late", 1, now() + Duration::days(2)))
            .await
            .unwrap();
        TrackedRepository::create(&pool, &release("Early", 1, now() - Duration::days(2)))
            .await
            .unwrap();

        let all = TrackedRepository::list_all(&pool).await.unwrap();
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Early", "Late"]);
    }

    #[tokio::test]
    async fn test_advance_and_delete() {
        let pool = memory_pool().await;
        TrackedRepository::create(&pool, &release("Show", 12, now()))
            .await
            .unwrap();

        let next = now() + Duration::days(7);
        assert!(TrackedRepository::advance(&pool, "Show", 13, next).await.unwrap());
        assert!(!TrackedRepository::advance(&pool, "Missing", 2, next).await.unwrap());

        let loaded = TrackedRepository::get_by_name(&pool, "Show")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.expected_episode, 13);
        assert_eq!(loaded.next_check_not_before, next);

        assert!(TrackedRepository::delete(&pool, "Show").await.unwrap());
        assert!(!TrackedRepository::delete(&pool, "Show").await.unwrap());
        assert!(TrackedRepository::list_all(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_site_is_invalid_row() {
        let pool = memory_pool().await;
        sqlx::query(
            "INSERT INTO tracked_release (name, site, next_check, episode, quality) VALUES ('Bad', 'nyaa', 0, 1, '720p')",
        )
        .execute(&pool)
        .await
        .unwrap();

        match TrackedRepository::list_all(&pool).await {
            Err(StoreError::InvalidRow { name, .. }) => assert_eq!(name, "Bad"),
            other => panic!("Expected invalid row, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sqlite_store_traits() {
        let pool = memory_pool().await;
        TrackedRepository::create(&pool, &release("Show", 3, now()))
            .await
            .unwrap();
        let store = SqliteTrackedStore::new(pool);

        assert_eq!(TrackedStore::list_due(&store, now()).await.unwrap().len(), 1);
        assert!(store.advance("Show", 4, now() + Duration::days(7)).await.unwrap());
        assert!(TrackedStore::list_due(&store, now()).await.unwrap().is_empty());
        assert_eq!(TrackedReader::list_all(&store).await.unwrap().len(), 1);
    }
}
