pub mod ai;
pub mod client;
pub mod database;
pub mod repositories;
