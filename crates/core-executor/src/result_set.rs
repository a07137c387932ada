use crate::error::{self as ex_error, ExecutionResult};
use datafusion::arrow::array::RecordBatch;
use datafusion::arrow::buffer::NullBuffer;
use datafusion::arrow::datatypes::{DataType, Field, SchemaRef};
use datafusion::arrow::util::display::{ArrayFormatter, FormatOptions};
use datafusion::execution::SendableRecordBatchStream;
use datafusion::physical_plan::stream::RecordBatchStreamAdapter;
use futures::StreamExt;
use snafu::ResultExt;
use std::fmt;

static FORMAT_OPTIONS: FormatOptions<'static> = FormatOptions::new();

/// Semantic type of a result column, as far as JSON rendering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Other,
}

impl ColumnKind {
    #[must_use]
    pub fn from_data_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => Self::Text,
            data_type if data_type.is_numeric() => Self::Numeric,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    #[must_use]
    pub fn from_field(field: &Field) -> Self {
        Self {
            name: field.name().clone(),
            kind: ColumnKind::from_data_type(field.data_type()),
        }
    }

    #[must_use]
    pub fn from_schema(schema: &SchemaRef) -> Vec<Self> {
        schema
            .fields()
            .iter()
            .map(|field| Self::from_field(field))
            .collect()
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }
}

/// A single cell: either null or the engine's textual representation of the scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Null,
    Text(String),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

/// Forward-only view over a query result.
///
/// Columns are fixed when the result is produced. Chunks are pulled lazily from the
/// underlying stream in arrival order and cannot be re-read. Batches without rows are
/// skipped; the end of the stream is the only terminal signal.
pub struct ResultSet {
    columns: Vec<Column>,
    stream: SendableRecordBatchStream,
}

impl ResultSet {
    #[must_use]
    pub fn new(stream: SendableRecordBatchStream) -> Self {
        Self {
            columns: Column::from_schema(&stream.schema()),
            stream,
        }
    }

    /// Wraps already materialized batches, mostly useful for tests and fixed results.
    #[must_use]
    pub fn from_batches(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        let stream = futures::stream::iter(batches.into_iter().map(Ok));
        Self::new(Box::pin(RecordBatchStreamAdapter::new(schema, stream)))
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub async fn next_chunk(&mut self) -> Option<ExecutionResult<Chunk>> {
        loop {
            match self.stream.next().await? {
                Err(source) => return Some(Err(ex_error::ExecutionError::DataFusion { source })),
                Ok(batch) if batch.num_rows() == 0 => {}
                Ok(batch) => return Some(Ok(Chunk { batch })),
            }
        }
    }
}

impl fmt::Debug for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Chunk {
    batch: RecordBatch,
}

impl Chunk {
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Prepares per-column formatters once so that cells can be read by position.
    pub fn rows(&self) -> ExecutionResult<ChunkRows<'_>> {
        let columns = self
            .batch
            .columns()
            .iter()
            .map(|array| {
                let formatter =
                    ArrayFormatter::try_new(array.as_ref(), &FORMAT_OPTIONS).context(ex_error::ArrowSnafu)?;
                Ok(ColumnCells {
                    nulls: array.logical_nulls(),
                    formatter,
                })
            })
            .collect::<ExecutionResult<Vec<_>>>()?;
        Ok(ChunkRows {
            columns,
            num_rows: self.batch.num_rows(),
        })
    }
}

struct ColumnCells<'a> {
    nulls: Option<NullBuffer>,
    formatter: ArrayFormatter<'a>,
}

pub struct ChunkRows<'a> {
    columns: Vec<ColumnCells<'a>>,
    num_rows: usize,
}

impl ChunkRows<'_> {
    #[must_use]
    pub const fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Reads one cell. `column` and `row` must be in range.
    pub fn value(&self, column: usize, row: usize) -> ExecutionResult<Value> {
        let cells = &self.columns[column];
        if cells.nulls.as_ref().is_some_and(|nulls| nulls.is_null(row)) {
            return Ok(Value::Null);
        }
        cells
            .formatter
            .value(row)
            .try_to_string()
            .map(Value::Text)
            .context(ex_error::ArrowSnafu)
    }

    /// Reads every cell of `row` in column order.
    pub fn row(&self, row: usize) -> ExecutionResult<Vec<Value>> {
        (0..self.num_columns())
            .map(|column| self.value(column, row))
            .collect()
    }
}
