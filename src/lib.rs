pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::Config;
pub use db::{create_pool, DbPool};
pub use error::{AppError, Result};
