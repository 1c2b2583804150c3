use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::files::{NewSharedFile, SharedFile, SharedFileContent};
use crate::domain::repositories::SharedFileRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::map_sqlx_error;

#[derive(Clone)]
pub struct SqlSharedFileRepository {
    pool: DatabasePool,
}

impl SqlSharedFileRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: SharedFileRecord) -> SharedFile {
        SharedFile {
            name: record.name,
            content_type: record.content_type,
            size: record.size,
            created_at: record.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SharedFileRecord {
    name: String,
    content_type: String,
    size: i64,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct SharedFileDataRecord {
    name: String,
    content_type: String,
    size: i64,
    created_at: DateTime<Utc>,
    data: Vec<u8>,
}

#[async_trait]
impl SharedFileRepository for SqlSharedFileRepository {
    async fn upsert(&self, file: NewSharedFile) -> Result<SharedFile, RepositoryError> {
        let size = i64::try_from(file.data.len())
            .map_err(|_| RepositoryError::unexpected("file size overflows i64"))?;

        let record = query_as::<_, SharedFileRecord>(
            r"INSERT INTO shared_files (name, content_type, size, data, created_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT (name)
               DO UPDATE SET content_type = excluded.content_type,
                             size = excluded.size,
                             data = excluded.data,
                             created_at = excluded.created_at
               RETURNING name, content_type, size, created_at",
        )
        .bind(&file.name)
        .bind(&file.content_type)
        .bind(size)
        .bind(&file.data)
        // Fixed precision keeps the text column ordered by time.
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Self::into_domain(record))
    }

    async fn list(&self, limit: u32) -> Result<Vec<SharedFile>, RepositoryError> {
        let records = query_as::<_, SharedFileRecord>(
            r"SELECT name, content_type, size, created_at
               FROM shared_files
               ORDER BY created_at DESC, rowid DESC
               LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(records.into_iter().map(Self::into_domain).collect())
    }

    async fn get(&self, name: &str) -> Result<SharedFileContent, RepositoryError> {
        let record = query_as::<_, SharedFileDataRecord>(
            r"SELECT name, content_type, size, created_at, data
               FROM shared_files
               WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(SharedFileContent {
            file: SharedFile {
                name: record.name,
                content_type: record.content_type,
                size: record.size,
                created_at: record.created_at,
            },
            data: record.data,
        })
    }

    async fn delete(&self, name: &str) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM shared_files WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
