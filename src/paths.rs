//! Path resolution for the todo database.
//!
//! Provides XDG-compliant default locations with an environment override.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "TODO_DB_PATH";

const APP_DIR: &str = "todo-agenda";
const DB_FILE: &str = "todoApplication.db";

/// Get XDG-compliant data directory.
///
/// `$XDG_DATA_HOME/todo-agenda`, else `$HOME/.local/share/todo-agenda`,
/// else `./todo-agenda` when neither variable is set.
pub fn get_data_dir() -> PathBuf {
    let data_home = env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .unwrap_or_else(|_| PathBuf::from("."));

    data_home.join(APP_DIR)
}

/// Get database file path.
///
/// `TODO_DB_PATH` wins; otherwise `data_dir/todoApplication.db`.
pub fn get_db_path() -> PathBuf {
    match env::var(DB_PATH_ENV) {
        Ok(path) if !path.is_empty() => PathBuf::from(path),
        _ => get_data_dir().join(DB_FILE),
    }
}
