use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
pub struct CliOpts {
    #[arg(
        long,
        env = "GEOSCOPE_HOST",
        default_value = "localhost",
        help = "Host to bind to"
    )]
    pub host: String,

    #[arg(
        long,
        env = "GEOSCOPE_PORT",
        default_value = "8080",
        help = "Port to bind to, 0 picks a free one"
    )]
    pub port: u16,

    #[arg(
        long,
        env = "CORS_ALLOW_ORIGIN",
        help = "CORS Allow Origin for the API"
    )]
    pub cors_allow_origin: Option<String>,

    #[arg(
        long,
        env = "GEOSCOPE_OPEN_BROWSER",
        default_value = "false",
        action = clap::ArgAction::Set,
        help = "Open the map front end in the system browser on start"
    )]
    pub open_browser: bool,

    #[arg(
        long,
        env = "GEOSCOPE_NO_SPATIAL",
        help = "Disable the spatial functions and the GeoJSON endpoint"
    )]
    pub no_spatial: bool,

    #[arg(
        long,
        env = "GEOSCOPE_INIT_SQL",
        help = "SQL script executed before serving, statements separated by ';'"
    )]
    pub init_sql: Option<String>,

    #[arg(
        long = "table",
        value_name = "NAME=PATH",
        value_parser = parse_table_source,
        help = "Register a csv, parquet, json or ndjson file as a table (repeatable)"
    )]
    pub tables: Vec<TableSource>,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, RUST_LOG takes precedence for the console output"
    )]
    pub tracing_level: TracingLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub name: String,
    pub path: String,
}

fn parse_table_source(value: &str) -> Result<TableSource, String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(TableSource {
            name: name.to_string(),
            path: path.to_string(),
        }),
        _ => Err(format!("expected NAME=PATH, got '{value}'")),
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum TracingLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => Self::OFF,
            TracingLevel::Error => Self::ERROR,
            TracingLevel::Warn => Self::WARN,
            TracingLevel::Info => Self::INFO,
            TracingLevel::Debug => Self::DEBUG,
            TracingLevel::Trace => Self::TRACE,
        }
    }
}
