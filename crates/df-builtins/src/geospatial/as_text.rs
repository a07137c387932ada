use super::data_types::{GeometryRef, any_single_geometry_type_input, map_geometries};
use super::error::{self as geo_error, GeoDataFusionResult};
use datafusion::arrow::datatypes::DataType;
use datafusion::logical_expr::{ColumnarValue, ScalarFunctionArgs, ScalarUDFImpl, Signature};
use datafusion_common::Result;
use geozero::ToWkt;
use geozero::wkb::Wkb;
use geozero::wkt::Wkt;
use snafu::ResultExt;
use std::any::Any;

// st_astext SQL function
// Returns the WKT representation of a geometry.
// Syntax: ST_ASTEXT( <geometry> )
#[derive(Debug)]
pub struct AsText {
    signature: Signature,
}

impl Default for AsText {
    fn default() -> Self {
        Self::new()
    }
}

impl AsText {
    #[must_use]
    pub fn new() -> Self {
        Self {
            signature: any_single_geometry_type_input(),
        }
    }
}

impl ScalarUDFImpl for AsText {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "st_astext"
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn return_type(&self, _arg_types: &[DataType]) -> Result<DataType> {
        Ok(DataType::Utf8)
    }

    fn invoke_with_args(&self, args: ScalarFunctionArgs) -> Result<ColumnarValue> {
        map_geometries(&args.args, self.name(), |geometry| {
            to_wkt(geometry, "st_astext")
        })
    }
}

/// Normalizes any stored geometry to WKT.
pub(crate) fn to_wkt(geometry: GeometryRef<'_>, function: &'static str) -> GeoDataFusionResult<String> {
    match geometry {
        GeometryRef::Wkt(text) => Wkt(text).to_wkt(),
        GeometryRef::Wkb(bytes) => Wkb(bytes.to_vec()).to_wkt(),
    }
    .context(geo_error::GeozeroSnafu { function })
}

super::super::macros::make_udf_function!(AsText);

#[cfg(test)]
mod tests {
    use super::*;
    use datafusion::prelude::SessionContext;
    use datafusion_common::assert_batches_eq;
    use datafusion_expr::ScalarUDF;

    #[tokio::test]
    async fn test_it_works() -> Result<()> {
        let ctx = SessionContext::new();
        ctx.register_udf(ScalarUDF::from(AsText::new()));

        let sql = "SELECT st_astext(g) AS wkt FROM (VALUES \
            ('POINT(1 2)'), \
            (NULL), \
            ('LINESTRING(0 0,3 4)')) AS t(g)";
        let result = ctx.sql(sql).await?.collect().await?;

        assert_batches_eq!(
            &[
                "+---------------------+",
                "| wkt                 |",
                "+---------------------+",
                "| POINT(1 2)          |",
                "|                     |",
                "| LINESTRING(0 0,3 4) |",
                "+---------------------+",
            ],
            &result
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_wkb_input() -> Result<()> {
        let ctx = SessionContext::new();
        ctx.register_udf(ScalarUDF::from(AsText::new()));

        let sql = "SELECT st_astext(decode('0101000000000000000000f03f0000000000000040', 'hex')) AS wkt";
        let result = ctx.sql(sql).await?.collect().await?;

        assert_batches_eq!(
            &[
                "+------------+",
                "| wkt        |",
                "+------------+",
                "| POINT(1 2) |",
                "+------------+",
            ],
            &result
        );
        Ok(())
    }
}
