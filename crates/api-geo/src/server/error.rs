use http::header::InvalidHeaderValue;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ServerError {
    #[snafu(display("Failed to bind {addr}: {source}"))]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[snafu(display("Failed to build server runtime: {source}"))]
    Runtime { source: std::io::Error },

    #[snafu(display("Failed to spawn server thread: {source}"))]
    Spawn { source: std::io::Error },

    #[snafu(display("Invalid CORS origin {origin}: {source}"))]
    InvalidOrigin {
        origin: String,
        source: InvalidHeaderValue,
    },
}

pub type ServerResult<T> = std::result::Result<T, ServerError>;
