pub mod books;
pub mod files;
pub mod genres;

pub use books::SqlBookRepository;
pub use files::SqlSharedFileRepository;
pub use genres::SqlGenreRepository;

use crate::domain::RepositoryError;

/// Missing tables become `SchemaMissing`; everything else is unexpected.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.message().contains("no such table")
    {
        return RepositoryError::SchemaMissing(db_err.message().to_string());
    }
    RepositoryError::unexpected(err.to_string())
}
