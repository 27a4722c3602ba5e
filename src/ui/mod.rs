//! Terminal rendering of the dashboard views.

pub mod components;
pub mod dashboard;
pub mod views;

pub use components::TextTable;
