//! SQLite implementation of the database traits.

mod connection;
mod todo;


pub use connection::SqliteDatabase;
pub use todo::SqliteTodoRepository;
