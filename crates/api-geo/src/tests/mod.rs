pub mod common;
pub mod server;

mod geojson;
mod query;
mod tables;
