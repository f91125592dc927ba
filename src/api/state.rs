//! Application state for the API server.

use std::sync::Arc;

use super::validators::RequestValidators;
use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so tests and the binary inject the store;
/// the state never opens one itself.
pub struct AppState<D: Database> {
    db: Arc<D>,
    validators: Arc<RequestValidators>,
}

// Manual Clone impl - only the Arcs are cloned, D need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            validators: Arc::clone(&self.validators),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState around an opened database.
    pub fn new(db: D) -> Self {
        Self {
            db: Arc::new(db),
            validators: Arc::new(RequestValidators::default()),
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get the request validator chains.
    pub fn validators(&self) -> &RequestValidators {
        &self.validators
    }
}
