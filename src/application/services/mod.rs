mod books;
pub mod stats;

pub use books::BookService;
pub use stats::compute_stats;
