//! Tabular JSON: a result set becomes an array of row objects keyed by column name.

use crate::error::{self as render_error, RenderResult};
use crate::json::{Field, Record, quote};
use core_executor::{ExecutionResult, ResultSet};
use serde::ser::{Error as _, SerializeSeq, Serializer};
use snafu::ResultExt;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Serializes a query outcome. Failures, including ones raised while pulling later chunks,
/// produce the error object instead of a partial array.
pub async fn to_json(result: ExecutionResult<ResultSet>) -> String {
    let outcome = match result {
        Ok(result) => try_to_json(result).await,
        Err(err) => Err(err.into()),
    };
    outcome.unwrap_or_else(|err| error_object(&err.to_string()))
}

/// Serializes every row of `result`, surfacing the first error encountered.
pub async fn try_to_json(mut result: ResultSet) -> RenderResult<String> {
    let fields = Field::for_columns(result.columns());

    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::new(&mut out);
    let mut rows = serializer
        .serialize_seq(None)
        .context(render_error::JsonSnafu)?;
    while let Some(chunk) = result.next_chunk().await {
        let chunk = chunk?;
        let cells = chunk.rows()?;
        for row in 0..cells.num_rows() {
            let values = cells.row(row)?;
            rows.serialize_element(&Record::new(&fields, &values))
                .context(render_error::JsonSnafu)?;
        }
    }
    rows.end().context(render_error::JsonSnafu)?;

    String::from_utf8(out)
        .map_err(serde_json::Error::custom)
        .context(render_error::JsonSnafu)
}

/// `{"error": "<message>"}`, with the message escaped.
#[must_use]
pub fn error_object(message: &str) -> String {
    let message = if message.is_empty() {
        UNKNOWN_ERROR
    } else {
        message
    };
    format!("{{\"error\": {}}}", quote(message))
}
