//! HTTP handlers.

mod agenda;
mod system;
mod todos;


pub use agenda::*;
pub use system::*;
pub use todos::*;
