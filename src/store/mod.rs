//! Durable key/value persistence for wizard state.

mod libsql_backend;
mod memory;
mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::KeyValueStore;
