//! PostgreSQL mirror: connection and work-time queries.

pub mod connection;
pub mod work_time;

pub use connection::{MirrorStatus, check, connect};
