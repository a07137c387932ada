use datafusion::arrow::error::ArrowError;
use datafusion_common::DataFusionError;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExecutionError {
    #[snafu(display("Cannot register UDF functions: {source}"))]
    RegisterUDF { source: DataFusionError },

    #[snafu(display("DataFusion error: {source}"))]
    DataFusion { source: DataFusionError },

    #[snafu(display("DataFusion query error: {source}, query: {query}"))]
    DataFusionQuery {
        #[snafu(source(from(DataFusionError, Box::new)))]
        source: Box<DataFusionError>,
        query: String,
    },

    #[snafu(display("Arrow error: {source}"))]
    Arrow { source: ArrowError },

    #[snafu(display("SQL parse error: {message}"))]
    Parse { message: String },

    #[snafu(display("Spatial extension not available"))]
    SpatialUnavailable,

    #[snafu(display("Unsupported file format for table {table}: {path}"))]
    UnsupportedFileFormat { table: String, path: String },
}

pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
