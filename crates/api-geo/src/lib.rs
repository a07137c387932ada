pub mod config;
pub mod control;
pub mod error;
pub mod geojson;
pub mod geometry;
pub mod handlers;
pub mod json;
pub mod layers;
pub mod response;
pub mod router;
pub mod rows;
pub mod server;
pub mod state;
#[cfg(test)]
pub mod tests;
pub mod web_assets;
