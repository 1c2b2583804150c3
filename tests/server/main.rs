mod files_api;
mod helpers;
mod session_api;
mod stats_api;
mod suggestions_api;
