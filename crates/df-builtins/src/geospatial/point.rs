use datafusion::arrow::array::StringArray;
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{
    ColumnarValue, ScalarFunctionArgs, ScalarUDFImpl, Signature, Volatility,
};
use datafusion_common::cast::as_float64_array;
use datafusion_common::{Result, exec_err};
use std::any::Any;
use std::sync::Arc;

// st_point SQL function
// Builds a point geometry from its coordinates.
// Syntax: ST_POINT( <x>, <y> )
#[derive(Debug)]
pub struct Point {
    signature: Signature,
}

impl Default for Point {
    fn default() -> Self {
        Self::new()
    }
}

impl Point {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: Signature::uniform(2, vec![DataType::Float64], Volatility::Immutable),
        }
    }
}

impl ScalarUDFImpl for Point {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "st_point"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        let arrays = ColumnarValue::values_to_arrays(&args.args)?;
        let [x, y] = arrays.as_slice() else {
            return exec_err!("st_point expects two arguments, got {}", arrays.len());
        };
        let points = as_float64_array(x)?
            .iter()
            .zip(as_float64_array(y)?.iter())
            .map(|(x, y)| Some(format!("POINT({} {})", x?, y?)))
            .collect::<StringArray>();
        Ok(ColumnarValue::Array(Arc::new(points)))
    }
}

super::super::macros::make_udf_function!(Point);
