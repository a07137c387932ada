use super::error::GeoDataFusionResult;
use datafusion::arrow::array::StringArray;
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{ColumnarValue, Signature, Volatility};
use datafusion_common::cast::{as_binary_array, as_string_array};
use datafusion_common::{Result, exec_err};
use std::sync::Arc;

/// A geometry value as stored in a column.
#[derive(Debug, Clone, Copy)]
pub enum GeometryRef<'a> {
    Wkt(&'a str),
    Wkb(&'a [u8]),
}

/// Geometries are accepted as WKT text or WKB binary.
pub fn any_single_geometry_type_input() -> Signature {
    Signature::uniform(
        1,
        vec![DataType::Utf8, DataType::Binary],
        Volatility::Immutable,
    )
}

/// Applies `f` to every non-null geometry of the single argument. Nulls map to nulls.
pub fn map_geometries<F>(args: &[ColumnarValue], function: &str, f: F) -> Result<ColumnarValue>
where
    F: Fn(GeometryRef<'_>) -> GeoDataFusionResult<String>,
{
    let Some(array) = ColumnarValue::values_to_arrays(args)?.into_iter().next() else {
        return exec_err!("Expected one argument in {function}");
    };

    let output = match array.data_type() {
        DataType::Utf8 => as_string_array(&array)?
            .iter()
            .map(|value| value.map(|text| f(GeometryRef::Wkt(text))).transpose())
            .collect::<GeoDataFusionResult<StringArray>>()?,
        DataType::Binary => as_binary_array(&array)?
            .iter()
            .map(|value| value.map(|bytes| f(GeometryRef::Wkb(bytes))).transpose())
            .collect::<GeoDataFusionResult<StringArray>>()?,
        DataType::Null => StringArray::new_null(array.len()),
        other => return exec_err!("Unsupported geometry type {other} in {function}"),
    };
    Ok(ColumnarValue::Array(Arc::new(output)))
}
