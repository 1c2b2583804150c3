pub mod analytics;
pub mod books;
pub mod errors;
pub mod files;
pub mod formatting;
pub mod genres;
pub mod ids;
pub mod listing;
pub mod repositories;

// Re-exports
pub use analytics::{aggregator, stats};
pub use errors::RepositoryError;
