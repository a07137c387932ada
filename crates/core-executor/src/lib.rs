pub mod connection;
pub mod database;
pub mod error;
pub mod result_set;
#[cfg(test)]
mod tests;

pub use connection::Connection;
pub use database::{Database, DatabaseConfig};
pub use error::{ExecutionError, ExecutionResult};
pub use result_set::{Chunk, ChunkRows, Column, ColumnKind, ResultSet, Value};
