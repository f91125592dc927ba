//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing the storage
//! backend to be swapped without changing the HTTP layer.

use std::future::Future;

use crate::db::{
    DbResult,
    models::{Todo, TodoId, TodoQuery},
};

/// Repository for Todo operations.
pub trait TodoRepository: Send + Sync {
    /// Insert a new todo with its client-chosen id.
    ///
    /// Fails with `DbError::AlreadyExists` if the id is taken.
    fn create(&self, todo: &Todo) -> impl Future<Output = DbResult<()>> + Send;

    /// Get a todo by id.
    fn get(&self, id: TodoId) -> impl Future<Output = DbResult<Todo>> + Send;

    /// List todos matching every present filter field.
    fn list(&self, query: Option<&TodoQuery>)
    -> impl Future<Output = DbResult<Vec<Todo>>> + Send;

    /// Rewrite every mutable column of an existing todo.
    fn update(&self, todo: &Todo) -> impl Future<Output = DbResult<()>> + Send;

    /// Delete a todo by id. Returns whether a row was removed.
    fn delete(&self, id: TodoId) -> impl Future<Output = DbResult<bool>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Todos<'a>: TodoRepository
    where
        Self: 'a;

    /// Create the `todo` table if it does not exist yet.
    fn init_schema(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the todo repository.
    fn todos(&self) -> Self::Todos<'_>;

    /// Release the underlying connection.
    fn close(&self) -> impl Future<Output = ()> + Send;
}
