//! The single-page map front end, compiled into the binary.

pub const INDEX_HTML: &str = include_str!("index.html");
