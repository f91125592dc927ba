//! Database error types.
//!
//! Storage-backend agnostic errors for the todo store, with miette
//! diagnostics so the binary can report startup failures readably.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(todo_agenda::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(
        code(todo_agenda::db::already_exists),
        help("Todo ids are chosen by the client and must be unique")
    )]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(todo_agenda::db::invalid_data), help("{help}"))]
    InvalidData { message: String, help: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(todo_agenda::db::database_error))]
    Database { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(todo_agenda::db::connection_error),
        help("Check that the database path is writable, or pass --db to choose another file")
    )]
    Connection { message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
