pub mod analytics;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod filter;
pub mod logging;
pub mod models;
pub mod notes;
pub mod source;
pub mod ui;

pub use error::{AppError, Result};
