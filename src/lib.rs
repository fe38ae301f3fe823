pub mod analytics;
pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod seed;
pub mod server;

pub use db::DbPool;
