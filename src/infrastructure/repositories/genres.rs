use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::genres::{Genre, NewGenre};
use crate::domain::ids::GenreId;
use crate::domain::repositories::GenreRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::map_sqlx_error;

#[derive(Clone)]
pub struct SqlGenreRepository {
    pool: DatabasePool,
}

impl SqlGenreRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: GenreRecord) -> Genre {
        Genre {
            id: GenreId::from(record.id),
            name: record.name,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl GenreRepository for SqlGenreRepository {
    async fn insert(&self, new_genre: NewGenre) -> Result<Genre, RepositoryError> {
        let new_genre = new_genre.normalize();

        let record = query_as::<_, GenreRecord>(
            "INSERT INTO genres (name, created_at) VALUES (?, ?) \
             RETURNING id, name, created_at",
        )
        .bind(&new_genre.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err
                && db_err.is_unique_violation()
            {
                return RepositoryError::conflict(format!(
                    "genre \"{}\" already exists",
                    new_genre.name
                ));
            }
            map_sqlx_error(err)
        })?;

        Ok(Self::into_domain(record))
    }

    async fn list(&self) -> Result<Vec<Genre>, RepositoryError> {
        let records = query_as::<_, GenreRecord>(
            "SELECT id, name, created_at FROM genres ORDER BY name COLLATE NOCASE ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(records.into_iter().map(Self::into_domain).collect())
    }

    async fn delete(&self, id: GenreId) -> Result<Genre, RepositoryError> {
        query_as::<_, GenreRecord>("DELETE FROM genres WHERE id = ? RETURNING id, name, created_at")
            .bind(i64::from(id))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(Self::into_domain)
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(sqlx::FromRow)]
struct GenreRecord {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}
