use super::as_text::to_wkt;
use super::data_types::map_geometries;
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{
    ColumnarValue, ScalarFunctionArgs, ScalarUDFImpl, Signature, Volatility,
};
use datafusion_common::Result;
use std::any::Any;

// st_geomfromtext SQL function
// Parses WKT into a geometry. Geometries are kept as normalized WKT text, so invalid input
// fails here rather than when the value is rendered.
// Syntax: ST_GEOMFROMTEXT( <wkt> )
#[derive(Debug)]
pub struct GeomFromText {
    signature: Signature,
}

impl Default for GeomFromText {
    fn default() -> Self {
        Self::new()
    }
}

impl GeomFromText {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: Signature::exact(vec![DataType::Utf8], Volatility::Immutable),
        }
    }
}

impl ScalarUDFImpl for GeomFromText {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "st_geomfromtext"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        map_geometries(&args.args, self.name(), |geometry| {
            to_wkt(geometry, "st_geomfromtext")
        })
    }
}

super::super::macros::make_udf_function!(GeomFromText);
