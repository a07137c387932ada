use core_executor::ExecutionError;
use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RenderError {
    #[snafu(transparent)]
    Execution { source: ExecutionError },

    #[snafu(display("Failed to render JSON: {source}"))]
    Json { source: serde_json::Error },
}

pub type RenderResult<T> = std::result::Result<T, RenderError>;
