//! Personal to-do list and daily agenda served over HTTP, backed by SQLite.

pub mod api;
pub mod db;
pub mod paths;
