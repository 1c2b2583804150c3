mod books_cli;
mod files_cli;
mod genres_cli;
mod stats_cli;
