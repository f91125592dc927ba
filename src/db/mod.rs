//! Database abstraction layer.
//!
//! Trait-based access to the `todo` table so the HTTP layer stays
//! independent of the storage backend.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Todo and its enumerated fields)
//! - `repository`: Trait definitions for data access
//! - `sqlite`: SQLx-backed implementation

mod error;
mod models;
mod repository;
pub mod sqlite;
pub mod utils;

#[cfg(test)]
mod models_test;

pub use error::{DbError, DbResult};
pub use models::*;
pub use repository::*;
pub use sqlite::SqliteDatabase;
